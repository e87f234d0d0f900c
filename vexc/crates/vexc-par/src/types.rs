//! The organized-program data model (spec.md §3): `Block`, `Class`,
//! `Function`, `Directive`, `Use`, and `Program`.
//!
//! Classes live in a flat arena (`IndexVec<ClassId, Class>`) per spec.md
//! §9's "Recursive class tree" redesign note — subclass adoption just moves
//! a `ClassId` between lists, no cyclic ownership to fight. Functions don't
//! have that problem (a function never adopts another function), so they're
//! owned directly by their `Class`.

use vexc_lex::Line;
use vexc_util::define_index;

define_index!(ClassId);
define_index!(FunctionId);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
    Protected,
}

impl Default for Access {
    fn default() -> Self {
        Access::Private
    }
}

/// An ordered run of Lines enclosed by a matching `{`/`}` pair, shared by
/// bare blocks, class bodies, and function bodies via composition (spec.md
/// §9's `BlockKind` suggestion, realized here without a dispatch tag since
/// Rust's ownership already keeps the three owners structurally distinct).
#[derive(Clone, Debug, Default)]
pub struct Block {
    pub lines: Vec<Line>,
}

impl Block {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

/// One Line whose first non-breadcrumb lexeme is `#`, left opaque to the
/// front-end (spec.md §3, §6).
#[derive(Clone, Debug)]
pub struct Directive {
    pub line: Line,
}

/// `use <dotted.path> [as <alias>]`. `alias` defaults to the last component
/// of `path` when no `as` clause is present (spec.md §3).
#[derive(Clone, Debug)]
pub struct Use {
    pub path: Vec<String>,
    pub alias: Vec<String>,
    pub breadcrumb: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct Function {
    pub name: String,
    pub params: Vec<vexc_lex::Lexeme>,
    pub return_type: Vec<vexc_lex::Lexeme>,
    pub access: Access,
    pub is_static: bool,
    pub body: Block,
    pub directives: Vec<Directive>,
    pub test_fn: Option<Box<Function>>,
    pub breadcrumb: Option<u32>,
}

impl Function {
    pub fn new(name: String, breadcrumb: Option<u32>) -> Self {
        Self {
            name,
            params: Vec::new(),
            return_type: Vec::new(),
            access: Access::default(),
            is_static: false,
            body: Block::default(),
            directives: Vec::new(),
            test_fn: None,
            breadcrumb,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Class {
    pub name: String,
    pub parents: Vec<String>,
    pub subclasses: Vec<ClassId>,
    pub functions: Vec<Function>,
    pub directives: Vec<Directive>,
    pub uses: Vec<Use>,
    pub body: Block,
    pub file: String,
    pub is_global: bool,
    pub access: Access,
    /// The header line's breadcrumb: B's "first breadcrumb" in spec.md
    /// §4.5's splice rule.
    pub breadcrumb: Option<u32>,
    /// The closing `}` line's breadcrumb, kept for diagnostic purposes;
    /// not part of spec.md's data model. Multiple braces sharing one
    /// physical source line repeat the same breadcrumb value (the
    /// tokenizer's brace-split Lines don't advance the physical line
    /// counter), so this is *not* suitable for testing enclosure — see
    /// `body_start`/`body_end` below.
    pub end_breadcrumb: Option<u32>,
    /// This class's header-line position in the per-file flat `Line` list
    /// the class extractor scanned (spec.md §4.4/§4.5). Unlike breadcrumbs,
    /// flat-list positions are unique and monotonic even when several
    /// class headers and closing braces share one physical source line, so
    /// the subclass nester uses these to test enclosure rather than
    /// `breadcrumb`/`end_breadcrumb`. Not part of spec.md's data model;
    /// meaningless once a class has been committed into the `Program`'s
    /// arena.
    pub body_start: usize,
    /// This class's closing `}` line position in the same flat `Line`
    /// list. See `body_start`.
    pub body_end: usize,
}

impl Class {
    pub fn new(name: String, file: String, breadcrumb: Option<u32>) -> Self {
        Self {
            name,
            parents: Vec::new(),
            subclasses: Vec::new(),
            functions: Vec::new(),
            directives: Vec::new(),
            uses: Vec::new(),
            body: Block::default(),
            file,
            is_global: true,
            access: Access::default(),
            breadcrumb,
            end_breadcrumb: None,
            body_start: 0,
            body_end: 0,
        }
    }
}

/// The handoff point to code generation (spec.md §3, §12): top-level
/// Classes, residual global Lines, top-level Directives, and the
/// accumulated Diagnostics (the latter live in the shared `Handler` rather
/// than on `Program` itself, so every pass can append to them through a
/// shared reference).
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub classes: vexc_util::IndexVec<ClassId, Class>,
    pub top_level: Vec<ClassId>,
    pub globals: Vec<Line>,
    pub directives: Vec<Directive>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }
}
