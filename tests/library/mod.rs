// @generated by crood-gen. Do not edit by hand.

pub mod domain;
pub mod fixture;
