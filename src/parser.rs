//! Turns AskScript source text into an AST
//!
//! Every node of the returned [`Program`] carries an id that indexes into
//! the [`SpanVec`] returned alongside it. Later stages only ever hand ids
//! around; a host that wants to render an error against the source looks
//! the span up here.

use pest::error::{Error, ErrorVariant};
use pest::{Parser, Span};
use pest_derive::Parser;

use crate::core::*;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct AskParser;

pub type SpanVec<'a> = Vec<Span<'a>>;
pub type ParseResult<T> = Result<T, Error<Rule>>;

pub type Pair<'a> = pest::iterators::Pair<'a, Rule>;
pub type Pairs<'a> = pest::iterators::Pairs<'a, Rule>;

/// parses a whole source file
///
/// Parsing is whole-input: anything left over after a complete program is
/// a syntax error. A second top-level ask block is rejected here too, with
/// its position, instead of being silently dropped further down the
/// pipeline.
pub fn parse(src: &str) -> ParseResult<(Program, SpanVec)> {
    let pairs = AskParser::parse(Rule::file, src)?;
    let mut span_vec = vec![];

    let program_id = span_vec.len();
    span_vec.push(Span::new(src, 0, src.len()).unwrap());

    let mut blocks = vec![];
    let mut extra_block_span = None;
    for pair in pairs {
        match pair.as_rule() {
            Rule::ask_block => {
                if !blocks.is_empty() && extra_block_span.is_none() {
                    extra_block_span = Some(pair.as_span());
                }
                blocks.push(parse_ask_block(pair, &mut span_vec)?);
            }
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }

    if let Some(span) = extra_block_span {
        return Err(Error::new_from_span(
            ErrorVariant::CustomError {
                message: "expected end of input, a program contains exactly one ask block".into(),
            },
            span,
        ));
    }

    Ok((Program(program_id, blocks), span_vec))
}

fn parse_ask_block<'a>(pair: Pair<'a>, span_vec: &mut SpanVec<'a>) -> ParseResult<Block> {
    let id = span_vec.len();
    span_vec.push(pair.as_span());

    let child = single_child_of(pair, Rule::ask_block);
    Ok(Block(id, parse_expression(child, span_vec)?))
}

fn parse_expression<'a>(pair: Pair<'a>, span_vec: &mut SpanVec<'a>) -> ParseResult<Expr> {
    span_vec.push(pair.as_span());

    let child = single_child_of(pair, Rule::expression);
    match child.as_rule() {
        Rule::string_lit => parse_string_lit(child, span_vec),
        Rule::int_lit => parse_int_lit(child, span_vec),
        Rule::invocation => parse_invocation(child, span_vec),
        _ => unreachable!(),
    }
}

fn parse_string_lit<'a>(pair: Pair<'a>, span_vec: &mut SpanVec<'a>) -> ParseResult<Expr> {
    let id = span_vec.len();
    span_vec.push(pair.as_span());

    let inner = single_child_of(pair, Rule::string_lit);
    Ok(Expr::StrLit(id, unescape(inner.as_str())))
}

fn parse_int_lit<'a>(pair: Pair<'a>, span_vec: &mut SpanVec<'a>) -> ParseResult<Expr> {
    let id = span_vec.len();
    span_vec.push(pair.as_span());
    debug_assert_eq!(pair.as_rule(), Rule::int_lit);

    let value = pair.as_str().parse::<i64>().map_err(|_| {
        Error::new_from_span(
            ErrorVariant::CustomError {
                message: format!("integer literal out of range: {}", pair.as_str()),
            },
            pair.as_span(),
        )
    })?;
    Ok(Expr::IntLit(id, value))
}

fn parse_invocation<'a>(pair: Pair<'a>, span_vec: &mut SpanVec<'a>) -> ParseResult<Expr> {
    let id = span_vec.len();
    span_vec.push(pair.as_span());
    debug_assert_eq!(pair.as_rule(), Rule::invocation);

    let mut inner = pair.into_inner();
    let symbol = inner.next().unwrap();
    debug_assert_eq!(symbol.as_rule(), Rule::symbol);

    let mut expr = match inner.peek() {
        Some(p) if matches!(p.as_rule(), Rule::call_args) => Expr::Call {
            id,
            callee: symbol.as_str().into(),
            receiver: None,
            args: parse_call_args(inner.next().unwrap(), span_vec)?,
        },
        _ => Expr::Symbol(id, symbol.as_str().into()),
    };

    // each tail wraps what came before it as the receiver
    for tail in inner {
        debug_assert_eq!(tail.as_rule(), Rule::method_tail);
        let tail_id = span_vec.len();
        span_vec.push(tail.as_span());

        let mut tail_inner = tail.into_inner();
        let method = tail_inner.next().unwrap();
        let args = parse_call_args(tail_inner.next().unwrap(), span_vec)?;
        expr = Expr::Call {
            id: tail_id,
            callee: method.as_str().into(),
            receiver: Some(Box::new(expr)),
            args,
        };
    }
    Ok(expr)
}

fn parse_call_args<'a>(pair: Pair<'a>, span_vec: &mut SpanVec<'a>) -> ParseResult<Vec<Expr>> {
    debug_assert_eq!(pair.as_rule(), Rule::call_args);
    pair.into_inner()
        .map(|p| parse_expression(p, span_vec))
        .collect()
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            // \" \' \\ and any other escaped char stand for themselves
            Some(other) => out.push(other),
            None => unreachable!("the grammar pairs every backslash with a char"),
        }
    }
    out
}

/// consumes a pair the grammar guarantees to be `rule` and to wrap exactly
/// one inner pair, returning that inner pair
fn single_child_of(pair: Pair, rule: Rule) -> Pair {
    debug_assert_eq!(pair.as_rule(), rule);
    let mut children = pair.into_inner();
    match (children.next(), children.next()) {
        (Some(only), None) => only,
        (first, second) => panic!(
            "one pair expected under {:?}, found {:?} and {:?}",
            rule, first, second
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_single_expr(src: &str) -> Expr {
        let (Program(_, mut blocks), _) = parse(src).unwrap();
        assert_eq!(blocks.len(), 1);
        let Block(_, expr) = blocks.remove(0);
        expr
    }

    #[test]
    fn parses_double_quoted_literal() {
        let expr = parse_single_expr("ask {\n  \"Hello world!\"\n}");
        assert!(matches!(expr, Expr::StrLit(_, s) if s == "Hello world!"));
    }

    #[test]
    fn parses_single_quoted_literal() {
        let expr = parse_single_expr("ask { 'Hello world!' }");
        assert!(matches!(expr, Expr::StrLit(_, s) if s == "Hello world!"));
    }

    #[test]
    fn resolves_escaped_quotes() {
        let expr = parse_single_expr(r#"ask { "she said \"hi\"\n" }"#);
        assert!(matches!(expr, Expr::StrLit(_, s) if s == "she said \"hi\"\n"));
    }

    #[test]
    fn parses_bare_identifier() {
        let expr = parse_single_expr("ask { hello }");
        assert!(matches!(expr, Expr::Symbol(_, s) if s == "hello"));
    }

    #[test]
    fn parses_int_literal() {
        let expr = parse_single_expr("ask { -42 }");
        assert!(matches!(expr, Expr::IntLit(_, -42)));
    }

    #[test]
    fn parses_call_with_args() {
        let expr = parse_single_expr("ask { concat('a', x, 1) }");
        let Expr::Call {
            callee,
            receiver,
            args,
            ..
        } = expr
        else {
            panic!("expected a call");
        };
        assert_eq!(callee, "concat");
        assert!(receiver.is_none());
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn parses_nullary_call() {
        let expr = parse_single_expr("ask { now() }");
        assert!(matches!(expr, Expr::Call { ref args, .. } if args.is_empty()));
    }

    #[test]
    fn keeps_method_sugar_in_the_ast() {
        let expr = parse_single_expr("ask { user.fetch('name') }");
        let Expr::Call {
            callee,
            receiver,
            args,
            ..
        } = expr
        else {
            panic!("expected a call");
        };
        assert_eq!(callee, "fetch");
        assert!(matches!(receiver.as_deref(), Some(Expr::Symbol(_, s)) if s == "user"));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn method_chains_fold_left() {
        let expr = parse_single_expr("ask { a.f().g() }");
        let Expr::Call {
            callee, receiver, ..
        } = expr
        else {
            panic!("expected a call");
        };
        assert_eq!(callee, "g");
        assert!(matches!(
            receiver.as_deref(),
            Some(Expr::Call { callee, .. }) if callee == "f"
        ));
    }

    #[test]
    fn rejects_empty_program() {
        assert!(parse("").is_err());
        assert!(parse("   \n").is_err());
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(parse("ask { \"oops }").is_err());
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(parse("ask { x } etc").is_err());
    }

    #[test]
    fn rejects_unmatched_brace() {
        assert!(parse("ask { x").is_err());
    }

    #[test]
    fn rejects_second_block_with_position() {
        let err = parse("ask { x }\nask { y }").unwrap_err();
        assert!(err.to_string().contains("exactly one ask block"));
    }

    #[test]
    fn skips_line_comments() {
        let expr = parse_single_expr("ask {\n  // greeting\n  hello\n}");
        assert!(matches!(expr, Expr::Symbol(_, s) if s == "hello"));
    }

    #[test]
    fn every_node_id_indexes_the_span_vec() {
        let (Program(id, blocks), spans) = parse("ask { f(x, 'y') }").unwrap();
        assert!(id < spans.len());
        let Block(block_id, _) = &blocks[0];
        assert!(*block_id < spans.len());
    }
}
