// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! File assembly.
//!
//! [`Generator::generate`] turns a [`DatabaseDefinition`] into formatted
//! source files laid out as a module tree:
//!
//! ```text
//! out/
//! ├── mod.rs              pub mod domain; pub mod fixture;
//! ├── domain/
//! │   ├── mod.rs          pub mod book; pub use book::*;
//! │   └── book.rs         BookDomain, BOOK, BookId
//! └── fixture/
//!     ├── mod.rs
//!     └── book.rs         BookTestDomain
//! ```
//!
//! With several schemas every schema gets its own directory above
//! `domain/` and `fixture/`.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf}
};

use proc_macro2::TokenStream;
use quote::quote;

use crate::{
    config::GeneratorConfig,
    context::{Matchers, TableContext},
    domain,
    error::CodegenError,
    fixture,
    meta::DatabaseDefinition,
    strategy::{DomainStrategy, GeneratorStrategy, TestDomainStrategy, ident}
};

/// First line of every emitted file.
pub const GENERATED_MARKER: &str = "// @generated by crood-gen. Do not edit by hand.";

/// One emitted source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub path:     PathBuf,
    /// Formatted source.
    pub contents: String
}

/// Emits domain modules, fixtures and module files.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig
}

impl Generator {
    /// Generator with the given options.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self {
            config
        }
    }

    /// Options in use.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every file for `database`.
    ///
    /// Tables without a primary key are skipped with a warning.
    ///
    /// # Errors
    ///
    /// - [`CodegenError::Metadata`] if `database` fails validation
    /// - [`CodegenError::Pattern`] for an invalid field expression
    /// - [`CodegenError::Syntax`] if emitted code does not parse
    pub fn generate(&self, database: &DatabaseDefinition) -> Result<Vec<GeneratedFile>, CodegenError> {
        database.validate()?;
        let matchers = Matchers::from_config(&self.config)?;
        let mut tree = ModuleTree::default();
        let mut files = Vec::new();

        for schema in &database.schemas {
            for table in &schema.tables {
                let ctx = TableContext::new(
                    database,
                    schema,
                    table,
                    &self.config,
                    &DomainStrategy,
                    &matchers
                )?;
                let Some(tokens) = domain::generate(&ctx) else {
                    continue;
                };
                files.push(tree.add(&ctx, &DomainStrategy, tokens)?);

                if self.config.generate_fixtures
                    && let Some(tokens) = fixture::generate(&ctx)
                {
                    files.push(tree.add(&ctx, &TestDomainStrategy, tokens)?);
                }
                tracing::info!(schema = %schema.name, table = %table.name, "generated");
            }
        }

        files.extend(tree.module_files()?);
        Ok(files)
    }

    /// Generate and write every file below `dir`.
    ///
    /// # Errors
    ///
    /// As [`Self::generate`], plus [`CodegenError::Io`] when writing fails.
    pub fn generate_into(
        &self,
        database: &DatabaseDefinition,
        dir: impl AsRef<Path>
    ) -> Result<Vec<GeneratedFile>, CodegenError> {
        let files = self.generate(database)?;
        write_all(&files, dir)?;
        Ok(files)
    }
}

/// Write `files` below `dir`, creating directories as needed.
///
/// # Errors
///
/// [`CodegenError::Io`] naming the path that failed.
pub fn write_all(files: &[GeneratedFile], dir: impl AsRef<Path>) -> Result<(), CodegenError> {
    let dir = dir.as_ref();
    for file in files {
        let path = dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
        }
        fs::write(&path, &file.contents).map_err(|e| CodegenError::io(&path, e))?;
        tracing::debug!(path = %path.display(), "written");
    }
    Ok(())
}

/// Parse and pretty-print a generated module.
///
/// # Errors
///
/// [`CodegenError::Syntax`] if `tokens` is not a valid file.
pub fn render(name: &str, tokens: TokenStream) -> Result<String, CodegenError> {
    let file: syn::File = syn::parse2(tokens).map_err(|source| CodegenError::Syntax {
        table: name.to_owned(),
        source
    })?;
    Ok(format!("{GENERATED_MARKER}\n\n{}", prettyplease::unparse(&file)))
}

/// Directories of the output and the modules each one declares.
#[derive(Debug, Default)]
struct ModuleTree {
    children: BTreeMap<Vec<String>, BTreeSet<String>>,
    packages: BTreeSet<Vec<String>>
}

impl ModuleTree {
    fn add(
        &mut self,
        ctx: &TableContext<'_>,
        strategy: &dyn GeneratorStrategy,
        tokens: TokenStream
    ) -> Result<GeneratedFile, CodegenError> {
        let package = strategy.package_path(ctx.database, &ctx.schema.name);
        let module = strategy.module_name(&ctx.table.name).to_string();
        let module = module.trim_start_matches("r#").to_owned();

        for depth in 0..package.len() {
            self.children
                .entry(package[..depth].to_vec())
                .or_default()
                .insert(package[depth].clone());
        }
        self.children.entry(package.clone()).or_default().insert(module.clone());
        self.packages.insert(package.clone());

        let mut path: PathBuf = package.iter().collect();
        path.push(format!("{module}.rs"));
        Ok(GeneratedFile {
            path,
            contents: render(&ctx.table.name, tokens)?
        })
    }

    fn module_files(&self) -> Result<Vec<GeneratedFile>, CodegenError> {
        self.children
            .iter()
            .map(|(dir, modules)| {
                let reexport = self.packages.contains(dir);
                let items = modules.iter().map(|m| {
                    let m = ident(m);
                    if reexport {
                        quote! { pub mod #m; pub use #m::*; }
                    } else {
                        quote! { pub mod #m; }
                    }
                });
                let mut path: PathBuf = dir.iter().collect();
                path.push("mod.rs");
                Ok(GeneratedFile {
                    contents: render("mod", quote! { #(#items)* })?,
                    path
                })
            })
            .collect()
    }
}
