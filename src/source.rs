//! Rust source scanner: a [`UnitDescriptor`] producer built on `syn`.
//!
//! Mapping from Rust items to the descriptor model:
//!
//! | Rust item                   | namespace        | type                 | signature         |
//! |-----------------------------|------------------|----------------------|-------------------|
//! | method in `impl Foo`        | crate + mod path | `Foo`                | `name(T1, T2)`    |
//! | method in `impl Tr for Foo` | crate + mod path | `Foo`                | `Tr.name(T1, T2)` |
//! | method in `trait Tr`        | crate + mod path | `Tr`                 | `name(T1, T2)`    |
//! | free `fn`                   | crate + mod path | `free_function_type` | `name(T1, T2)`    |
//!
//! The receiver is not part of the signature. Module paths come from the file
//! location (`a/b.rs`, `a/b/mod.rs` → `a::b`) plus inline `mod` blocks.
//! An `impl` whose self type has no nameable path (tuples, slices, ...) is
//! still reported, without a type, so the pipeline can account for it.

use std::fs;
use std::path::{Path, PathBuf};

use quote::ToTokens;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::visit::Visit;
use syn::{Attribute, Block, FnArg, ImplItem, Meta, Signature, TraitItem, Type};
use walkdir::{DirEntry, WalkDir};

use crate::config::SourceConfig;
use crate::descriptor::{BodyContent, UnitDescriptor};
use crate::error::StampError;

/// Scan every `.rs` file under `dir`, in path order.
pub fn scan_dir(
    dir: impl AsRef<Path>,
    cfg: &SourceConfig,
) -> Result<Vec<UnitDescriptor>, StampError> {
    let dir = dir.as_ref();
    let files = collect_rs_files(dir)?;

    let mut units = Vec::new();
    for path in &files {
        let relative = path.strip_prefix(dir).unwrap_or(path);
        let found = scan_file(path, &module_path_for(relative), cfg)?;
        tracing::debug!(file = %path.display(), units = found.len(), "scanned source file");
        units.extend(found);
    }
    tracing::debug!(files = files.len(), units = units.len(), "scanned source tree");
    Ok(units)
}

/// Scan one file whose items live at `module_path` below the crate root.
pub fn scan_file(
    path: impl AsRef<Path>,
    module_path: &[String],
    cfg: &SourceConfig,
) -> Result<Vec<UnitDescriptor>, StampError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| StampError::io(path, err))?;
    scan_source(&text, module_path, cfg).map_err(|err| StampError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Scan Rust source text.
pub fn scan_source(
    source: &str,
    module_path: &[String],
    cfg: &SourceConfig,
) -> Result<Vec<UnitDescriptor>, syn::Error> {
    let file = syn::parse_file(source)?;
    let mut collector = Collector {
        cfg,
        module_path: module_path.to_vec(),
        units: Vec::new(),
    };
    collector.visit_file(&file);
    Ok(collector.units)
}

/// Symlinks are reported as links and never followed, so a link back up the
/// tree cannot make the walk revisit a directory.
fn collect_rs_files(dir: &Path) -> Result<Vec<PathBuf>, StampError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden_or_build_dir(entry));
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            StampError::io(path, err.into())
        })?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "rs") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_hidden_or_build_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name == "target")
}

/// `lib.rs` → `[]`, `net/mod.rs` → `[net]`, `net/http.rs` → `[net, http]`.
fn module_path_for(relative: &Path) -> Vec<String> {
    let mut parts: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let is_root_file = parts.is_empty() && (stem == "lib" || stem == "main");
    if stem != "mod" && !is_root_file {
        parts.push(stem);
    }
    parts
}

struct Collector<'cfg> {
    cfg: &'cfg SourceConfig,
    module_path: Vec<String>,
    units: Vec<UnitDescriptor>,
}

impl Collector<'_> {
    fn namespace(&self) -> String {
        std::iter::once(self.cfg.crate_name.as_str())
            .chain(self.module_path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("::")
    }

    fn push(
        &mut self,
        type_name: Option<String>,
        prefix: Option<&str>,
        sig: &Signature,
        body: Option<&Block>,
    ) {
        let member_name = sig.ident.unraw().to_string();
        let params = render_params(sig);
        let qualified_signature = match prefix {
            Some(prefix) => format!("{prefix}.{member_name}({params})"),
            None => format!("{member_name}({params})"),
        };
        self.units.push(UnitDescriptor {
            namespace: Some(self.namespace()),
            type_name,
            member_name,
            qualified_signature,
            body: body.map(statements),
        });
    }

    fn skipped(&self, attrs: &[Attribute]) -> bool {
        self.cfg.skip_tests && (is_cfg_test(attrs) || is_test_fn(attrs))
    }
}

impl<'ast> Visit<'ast> for Collector<'_> {
    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        if self.skipped(&node.attrs) {
            return;
        }
        self.module_path.push(node.ident.unraw().to_string());
        syn::visit::visit_item_mod(self, node);
        self.module_path.pop();
    }

    fn visit_item_impl(&mut self, node: &'ast syn::ItemImpl) {
        if self.skipped(&node.attrs) {
            return;
        }
        let type_name = self_type_name(&node.self_ty);
        let trait_name = node
            .trait_
            .as_ref()
            .and_then(|(_, path, _)| path.segments.last())
            .map(|segment| segment.ident.unraw().to_string());

        for item in &node.items {
            if let ImplItem::Fn(method) = item {
                if self.skipped(&method.attrs) {
                    continue;
                }
                self.push(
                    type_name.clone(),
                    trait_name.as_deref(),
                    &method.sig,
                    Some(&method.block),
                );
            }
        }
    }

    fn visit_item_trait(&mut self, node: &'ast syn::ItemTrait) {
        if self.skipped(&node.attrs) {
            return;
        }
        let type_name = node.ident.unraw().to_string();
        for item in &node.items {
            if let TraitItem::Fn(method) = item {
                self.push(
                    Some(type_name.clone()),
                    None,
                    &method.sig,
                    method.default.as_ref(),
                );
            }
        }
    }

    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        // Items nested in function bodies are not visited.
        if !self.cfg.include_free_functions || self.skipped(&node.attrs) {
            return;
        }
        let type_name = self.cfg.free_function_type.clone();
        self.push(Some(type_name), None, &node.sig, Some(&node.block));
    }
}

fn statements(block: &Block) -> BodyContent {
    BodyContent::Statements(
        block
            .stmts
            .iter()
            .map(|stmt| stmt.to_token_stream().to_string())
            .collect(),
    )
}

fn render_params(sig: &Signature) -> String {
    sig.inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Receiver(_) => None,
            FnArg::Typed(pat) => Some(compact_tokens(&pat.ty.to_token_stream().to_string())),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn self_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.unraw().to_string()),
        Type::Reference(reference) => self_type_name(&reference.elem),
        Type::Paren(paren) => self_type_name(&paren.elem),
        Type::Group(group) => self_type_name(&group.elem),
        _ => None,
    }
}

/// `& mut fmt :: Formatter < '_ >` → `&mut fmt::Formatter<'_>`.
fn compact_tokens(text: &str) -> String {
    let mut compact = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && compact.chars().last().is_some_and(is_word_char) && is_word_char(ch) {
            compact.push(' ');
        }
        pending_space = false;
        compact.push(ch);
    }
    compact
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_cfg_test(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("cfg"))
        .any(|attr| attr.parse_args::<Meta>().is_ok_and(|meta| cfg_mentions_test(&meta)))
}

fn cfg_mentions_test(meta: &Meta) -> bool {
    match meta {
        Meta::Path(path) => path.is_ident("test"),
        Meta::List(list) if list.path.is_ident("all") || list.path.is_ident("any") => list
            .parse_args_with(Punctuated::<Meta, syn::Token![,]>::parse_terminated)
            .is_ok_and(|nested| nested.iter().any(cfg_mentions_test)),
        _ => false,
    }
}

/// `#[test]`, `#[tokio::test]` and friends.
fn is_test_fn(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "test")
    })
}
