use super::ast::{Arg, Expr, ParsedStatement};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace0, satisfy, space0, space1},
    combinator::{map, map_res, opt, recognize},
    multi::{many0, separated_list0, separated_list1},
    number::complete::double,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

// --- Helpers ---

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

/// Identifiers may use any alphabetic character, so `γ` is a valid name.
fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            satisfy(|c| c.is_alphabetic() || c == '_'),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )),
        |s: &str| s.to_string(),
    )(input)
}

fn usize_parser(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

pub fn comment(input: &str) -> IResult<&str, ()> {
    map(pair(tag("//"), take_while(|c: char| c != '\n')), |_| ())(input)
}

// --- Expressions ---

fn factor(input: &str) -> IResult<&str, Expr> {
    ws(alt((
        map(preceded(char('-'), factor), |e| Expr::Neg(Box::new(e))),
        delimited(char('('), expr, char(')')),
        map(identifier, Expr::Var),
        map(double, Expr::Float),
    )))(input)
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (input, first) = factor(input)?;
    let (input, rest) = many0(pair(alt((char('*'), char('/'))), factor))(input)?;
    let folded = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '*' => Expr::Mul(Box::new(acc), Box::new(rhs)),
        _ => Expr::Div(Box::new(acc), Box::new(rhs)),
    });
    Ok((input, folded))
}

/// Arithmetic over numbers, `pi` and parameter names.
pub fn expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = term(input)?;
    let (input, rest) = many0(pair(alt((char('+'), char('-'))), term))(input)?;
    let folded = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '+' => Expr::Add(Box::new(acc), Box::new(rhs)),
        _ => Expr::Sub(Box::new(acc), Box::new(rhs)),
    });
    Ok((input, folded))
}

// --- QASM Parsers ---

pub fn openqasm_version(input: &str) -> IResult<&str, String> {
    map(
        tuple((
            tag("OPENQASM"),
            space1,
            take_while1(|c: char| c != ';'),
            tag(";"),
        )),
        |(_, _, version, _): (&str, &str, &str, &str)| version.trim().to_string(),
    )(input)
}

pub fn include(input: &str) -> IResult<&str, ParsedStatement> {
    map(
        tuple((
            tag("include"),
            space1,
            delimited(char('"'), take_while1(|c: char| c != '"'), char('"')),
            space0,
            tag(";"),
        )),
        |(_, _, name, _, _): (&str, &str, &str, &str, &str)| {
            ParsedStatement::Include(name.to_string())
        },
    )(input)
}

pub fn qreg(input: &str) -> IResult<&str, ParsedStatement> {
    map(
        tuple((
            tag("qreg"),
            space1,
            identifier,
            delimited(char('['), usize_parser, char(']')),
            space0,
            tag(";"),
        )),
        |(_, _, name, size, _, _)| ParsedStatement::QReg(name, size),
    )(input)
}

pub fn creg(input: &str) -> IResult<&str, ParsedStatement> {
    map(
        tuple((
            tag("creg"),
            space1,
            identifier,
            delimited(char('['), usize_parser, char(']')),
            space0,
            tag(";"),
        )),
        |(_, _, name, size, _, _)| ParsedStatement::CReg(name, size),
    )(input)
}

fn argument(input: &str) -> IResult<&str, Arg> {
    pair(
        identifier,
        opt(delimited(char('['), usize_parser, char(']'))),
    )(input)
}

fn argument_list(input: &str) -> IResult<&str, Vec<Arg>> {
    separated_list1(ws(char(',')), argument)(input)
}

pub fn gate_call(input: &str) -> IResult<&str, ParsedStatement> {
    let (input, name) = identifier(input)?;
    let (input, params) = opt(delimited(
        pair(space0, char('(')),
        separated_list0(char(','), expr),
        char(')'),
    ))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, qubits) = argument_list(input)?;
    let (input, _) = pair(space0, tag(";"))(input)?;

    Ok((
        input,
        ParsedStatement::Gate(name, qubits, params.unwrap_or_default()),
    ))
}

pub fn measure(input: &str) -> IResult<&str, ParsedStatement> {
    map(
        tuple((
            tag("measure"),
            space1,
            argument,
            space0,
            tag("->"),
            space0,
            argument,
            space0,
            tag(";"),
        )),
        |(_, _, q, _, _, _, c, _, _)| ParsedStatement::Measure(q, c),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_precedence() {
        let (rest, parsed) = expr("1 + 2*x").unwrap();
        assert_eq!(rest, "");
        assert_eq!(
            parsed,
            Expr::Add(
                Box::new(Expr::Float(1.0)),
                Box::new(Expr::Mul(
                    Box::new(Expr::Float(2.0)),
                    Box::new(Expr::Var("x".to_string()))
                ))
            )
        );
    }

    #[test]
    fn test_expr_unary_minus_and_parens() {
        let (_, parsed) = expr("-(pi/2)").unwrap();
        assert!(matches!(parsed, Expr::Neg(_)));
    }

    #[test]
    fn test_unicode_identifier() {
        assert_eq!(identifier("γ0 rest"), Ok((" rest", "γ0".to_string())));
    }
}
