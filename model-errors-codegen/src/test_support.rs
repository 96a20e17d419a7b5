//! Interpreter for emitted `from_error_type` routines
//!
//! Parses generated code with `syn` and evaluates the decode routine for a
//! token, so tests check what the emitted code does rather than how it is
//! spelled. Only the constructs the built-in initializers emit are handled.

use crate::initializer::is_validation_error_shape;
use syn::{BinOp, Block, Expr, ImplItem, Item, Lit, Pat, Stmt};

/// Variant constructed for a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decoded {
    /// Variant identifier
    pub variant: String,
    /// Token carried by the variant, if it carries one
    pub payload: Option<String>,
}

/// Evaluate the emitted `from_error_type` for `token`
pub(crate) fn decode(code: &str, token: &str) -> Decoded {
    let file = syn::parse_file(code).expect("generated code parses");
    let block = find_routine(&file).expect("from_error_type is emitted");
    eval_stmts(&block.stmts, token).expect("routine constructs a variant")
}

fn find_routine(file: &syn::File) -> Option<&Block> {
    for item in &file.items {
        match item {
            Item::Fn(f) if f.sig.ident == "from_error_type" => return Some(f.block.as_ref()),
            Item::Impl(imp) => {
                for impl_item in &imp.items {
                    if let ImplItem::Fn(f) = impl_item {
                        if f.sig.ident == "from_error_type" {
                            return Some(&f.block);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn eval_stmts(stmts: &[Stmt], token: &str) -> Option<Decoded> {
    for stmt in stmts {
        if let Stmt::Expr(expr, _) = stmt {
            if let Some(decoded) = eval_expr(expr, token) {
                return Some(decoded);
            }
        }
    }
    None
}

fn eval_expr(expr: &Expr, token: &str) -> Option<Decoded> {
    match expr {
        Expr::If(if_expr) => {
            if condition_holds(&if_expr.cond, token) {
                eval_stmts(&if_expr.then_branch.stmts, token)
            } else if let Some((_, else_branch)) = &if_expr.else_branch {
                eval_expr(else_branch, token)
            } else {
                None
            }
        }
        Expr::Block(block) => eval_stmts(&block.block.stmts, token),
        Expr::Return(ret) => ret.expr.as_deref().and_then(|e| constructed(e, token)),
        Expr::Match(match_expr) => match_expr
            .arms
            .iter()
            .find(|arm| pattern_matches(&arm.pat, token))
            .and_then(|arm| constructed(&arm.body, token)),
        other => constructed(other, token),
    }
}

fn condition_holds(cond: &Expr, token: &str) -> bool {
    match cond {
        Expr::Paren(paren) => condition_holds(&paren.expr, token),
        Expr::Call(call) if last_segment(&call.func).as_deref() == Some("is_validation_error") => {
            is_validation_error_shape(token)
        }
        Expr::Binary(bin) if matches!(bin.op, BinOp::Eq(_)) => {
            string_literal(&bin.right)
                .or_else(|| string_literal(&bin.left))
                .is_some_and(|value| value == token)
        }
        other => panic!("unsupported condition: {}", quote::quote!(#other)),
    }
}

fn pattern_matches(pat: &Pat, token: &str) -> bool {
    match pat {
        Pat::Lit(lit) => matches!(&lit.lit, Lit::Str(s) if s.value() == token),
        Pat::Ident(_) | Pat::Wild(_) => true,
        Pat::Or(or) => or.cases.iter().any(|case| pattern_matches(case, token)),
        _ => false,
    }
}

fn constructed(expr: &Expr, token: &str) -> Option<Decoded> {
    match expr {
        Expr::Path(_) => last_segment(expr).map(|variant| Decoded {
            variant,
            payload: None,
        }),
        Expr::Call(call) => last_segment(&call.func).map(|variant| Decoded {
            variant,
            payload: (!call.args.is_empty()).then(|| token.to_string()),
        }),
        _ => None,
    }
}

fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(s) => Some(s.value()),
            _ => None,
        },
        _ => None,
    }
}

fn last_segment(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}
