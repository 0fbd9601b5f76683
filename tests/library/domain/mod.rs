// @generated by crood-gen. Do not edit by hand.

pub mod author;
pub use author::*;
pub mod book;
pub use book::*;
pub mod book_tag;
pub use book_tag::*;
