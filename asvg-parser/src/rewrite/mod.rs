//! Rewrites calculator-style shorthand into plain function-call notation.
//!
//! The rewrite is a fixed sequence of text passes:
//!
//! 1. whitespace is removed,
//! 2. `sin^-1` and friends become `arcsin` and friends,
//! 3. a standalone `e` becomes the constant `(E)`,
//! 4. implicit multiplication gets an explicit `*`,
//! 5. every `a^b` becomes `pow(a,b)`,
//! 6. every `a!` becomes `factorial(a)`.
//!
//! Passes 5 and 6 only run under [`ExponentPolicy::LeftToRight`]. They resolve the leftmost
//! operator first and rescan from the start after each replacement, so `2^3^2` becomes
//! `pow(pow(2,3),2)`. Under [`ExponentPolicy::Standard`], `^` and `!` are left in place and the
//! expression parser gives them their usual precedence and associativity.

pub mod error;

use asvg_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How `^` and `!` are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExponentPolicy {
    /// Resolve `^` and `!` by text rewriting, leftmost first. Chains such as `a^b^c` group to
    /// the left.
    #[default]
    LeftToRight,

    /// Leave `^` and `!` for the parser; `^` is right-associative and `!` is postfix.
    Standard,
}

/// Inverse function shorthand and its replacement.
const INVERSES: [(&str, &str); 12] = [
    ("sin^-1", "arcsin"),
    ("cos^-1", "arccos"),
    ("tan^-1", "arctan"),
    ("sec^-1", "arcsec"),
    ("csc^-1", "arccsc"),
    ("cot^-1", "arccot"),
    ("sinh^-1", "arcsinh"),
    ("cosh^-1", "arccosh"),
    ("tanh^-1", "arctanh"),
    ("sech^-1", "arcsech"),
    ("csch^-1", "arccsch"),
    ("coth^-1", "arccoth"),
];

/// Normalizes shorthand math notation with the default [`ExponentPolicy`].
///
/// ```
/// use asvg_parser::rewrite::normalize;
///
/// assert_eq!(normalize("2x^2 + 1").unwrap(), "2*pow(x,2)+1");
/// ```
pub fn normalize(src: &str) -> Result<String, Error> {
    normalize_with(src, ExponentPolicy::default())
}

/// Normalizes shorthand math notation with the given [`ExponentPolicy`].
pub fn normalize_with(src: &str, policy: ExponentPolicy) -> Result<String, Error> {
    let text = strip_whitespace(src);
    let text = expand_inverses(&text);
    let text = name_euler_constant(&text);
    let text = insert_multiplication(&text);
    match policy {
        ExponentPolicy::LeftToRight => {
            let text = resolve_powers(&text)?;
            resolve_factorials(&text)
        },
        ExponentPolicy::Standard => Ok(text),
    }
}

/// Removes all whitespace.
pub fn strip_whitespace(src: &str) -> String {
    src.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Rewrites `sin^-1` to `arcsin`, and likewise for the other trigonometric and hyperbolic
/// functions.
pub fn expand_inverses(src: &str) -> String {
    INVERSES.iter().fold(src.to_string(), |text, (from, to)| text.replace(from, to))
}

/// Rewrites a standalone `e` to `(E)`. An `e` that touches another letter is part of a name and
/// is left alone.
pub fn name_euler_constant(src: &str) -> String {
    let chars = src.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(src.len());
    for (i, &c) in chars.iter().enumerate() {
        let before = i.checked_sub(1).map(|j| chars[j]);
        let after = chars.get(i + 1).copied();
        let is_letter = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphabetic());
        if c == 'e' && !is_letter(before) && !is_letter(after) {
            out.push_str("(E)");
        } else {
            out.push(c);
        }
    }
    out
}

/// Inserts `*` after a digit that is followed by `(` or a letter, and after `)` that is followed
/// by `(`, a digit, or a letter.
pub fn insert_multiplication(src: &str) -> String {
    let chars = src.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(src.len());
    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        let Some(&next) = chars.get(i + 1) else {
            continue;
        };

        let implicit = match c {
            '0'..='9' => next == '(' || next.is_ascii_alphabetic(),
            ')' => next == '(' || next.is_ascii_alphanumeric(),
            _ => false,
        };
        if implicit {
            out.push('*');
        }
    }
    out
}

/// Rewrites every `a^b` to `pow(a,b)`, leftmost first.
pub fn resolve_powers(src: &str) -> Result<String, Error> {
    let mut chars = src.chars().collect::<Vec<_>>();
    while let Some(op) = chars.iter().position(|&c| c == '^') {
        let start = operand_start(&chars, op)?;
        let end = operand_end(&chars, op)?;
        let left = chars[start..op].iter().collect::<String>();
        let right = chars[op + 1..end].iter().collect::<String>();
        let replacement = format!("pow({},{})", left, right);
        chars.splice(start..end, replacement.chars());
    }
    Ok(chars.into_iter().collect())
}

/// Rewrites every `a!` to `factorial(a)`, leftmost first.
pub fn resolve_factorials(src: &str) -> Result<String, Error> {
    let mut chars = src.chars().collect::<Vec<_>>();
    while let Some(op) = chars.iter().position(|&c| c == '!') {
        let start = operand_start(&chars, op)?;
        let operand = chars[start..op].iter().collect::<String>();
        let replacement = format!("factorial({})", operand);
        chars.splice(start..op + 1, replacement.chars());
    }
    Ok(chars.into_iter().collect())
}

/// Builds the error for an operand that is absent.
fn missing(chars: &[char], op: usize, left: bool) -> Error {
    Error::new(vec![op..op + 1], error::MissingOperand {
        operator: chars[op],
        left,
        text: chars.iter().collect(),
        position: op,
    })
}

/// Builds the error for a character that cannot be part of an operand.
fn unrecognized(chars: &[char], op: usize, position: usize) -> Error {
    Error::new(vec![position..position + 1], error::UnrecognizedOperand {
        operator: chars[op],
        found: chars[position],
        text: chars.iter().collect(),
        position,
    })
}

/// Returns the index of the first character of the operand that ends right before `op`.
fn operand_start(chars: &[char], op: usize) -> Result<usize, Error> {
    if op == 0 {
        return Err(missing(chars, op, true));
    }

    let mut j = op;
    let last = chars[op - 1];
    if last.is_ascii_digit() {
        while j > 0 && chars[j - 1].is_ascii_digit() {
            j -= 1;
        }
        if j > 0 && chars[j - 1] == '.' {
            j -= 1;
            while j > 0 && chars[j - 1].is_ascii_digit() {
                j -= 1;
            }
        }
    } else if last == ')' {
        let mut depth = 0usize;
        loop {
            if j == 0 {
                return Err(unrecognized(chars, op, op - 1));
            }
            j -= 1;
            match chars[j] {
                ')' => depth += 1,
                '(' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                },
                _ => (),
            }
        }

        // the group may be the argument list of a function call
        while j > 0 && chars[j - 1].is_ascii_alphabetic() {
            j -= 1;
        }
    } else if last.is_ascii_alphabetic() {
        while j > 0 && chars[j - 1].is_ascii_alphabetic() {
            j -= 1;
        }
    } else {
        return Err(unrecognized(chars, op, op - 1));
    }

    Ok(j)
}

/// Returns the index one past the last character of the operand that starts right after `op`.
fn operand_end(chars: &[char], op: usize) -> Result<usize, Error> {
    let mut k = op + 1;
    if k >= chars.len() {
        return Err(missing(chars, op, false));
    }

    if chars[k] == '-' {
        k += 1;
        if k >= chars.len() {
            return Err(missing(chars, op, false));
        }
    }

    let first = chars[k];
    if first.is_ascii_digit() || first == '.' {
        while k < chars.len() && chars[k].is_ascii_digit() {
            k += 1;
        }
        if k < chars.len() && chars[k] == '.' {
            k += 1;
            while k < chars.len() && chars[k].is_ascii_digit() {
                k += 1;
            }
        }
    } else if first == '(' {
        k = group_end(chars, op, k)?;
    } else if first.is_ascii_alphabetic() {
        while k < chars.len() && chars[k].is_ascii_alphabetic() {
            k += 1;
        }
        if k < chars.len() && chars[k] == '(' {
            k = group_end(chars, op, k)?;
        }
    } else {
        return Err(unrecognized(chars, op, k));
    }

    Ok(k)
}

/// Returns the index one past the parenthesis that closes the one at `open`.
fn group_end(chars: &[char], op: usize, open: usize) -> Result<usize, Error> {
    let mut depth = 0usize;
    for (k, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(k + 1);
                }
            },
            _ => (),
        }
    }
    Err(unrecognized(chars, op, open))
}

#[cfg(test)]
mod tests {
    use asvg_error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exponent_chain_groups_left() {
        assert_eq!(normalize("2^3^2").unwrap(), "pow(pow(2,3),2)");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(normalize("2x").unwrap(), "2*x");
        assert_eq!(normalize("(x+1)(x-1)").unwrap(), "(x+1)*(x-1)");
        assert_eq!(normalize("3(x)2").unwrap(), "3*(x)*2");
        assert_eq!(normalize("2sin(x)").unwrap(), "2*sin(x)");
    }

    #[test]
    fn inverse_shorthand() {
        assert_eq!(normalize("sin^-1(0.5)").unwrap(), "arcsin(0.5)");
        assert_eq!(normalize("cosh^-1(x) + tan^-1(x)").unwrap(), "arccosh(x)+arctan(x)");
    }

    #[test]
    fn whitespace_is_removed() {
        assert_eq!(normalize(" 1 +\t x ").unwrap(), "1+x");
    }

    #[test]
    fn euler_constant() {
        assert_eq!(normalize("e").unwrap(), "(E)");
        assert_eq!(normalize("e^x").unwrap(), "pow((E),x)");
        assert_eq!(normalize("2e").unwrap(), "2*(E)");
        assert_eq!(normalize("sec(x)+exp(1)").unwrap(), "sec(x)+exp(1)");
    }

    #[test]
    fn power_operands() {
        assert_eq!(normalize("1.5^2").unwrap(), "pow(1.5,2)");
        assert_eq!(normalize("x^-1").unwrap(), "pow(x,-1)");
        assert_eq!(normalize("x^2.5").unwrap(), "pow(x,2.5)");
        assert_eq!(normalize("(x+1)^2").unwrap(), "pow((x+1),2)");
        assert_eq!(normalize("sin(x)^2").unwrap(), "pow(sin(x),2)");
        assert_eq!(normalize("2^(x+1)").unwrap(), "pow(2,(x+1))");
        assert_eq!(normalize("2^sin(x)").unwrap(), "pow(2,sin(x))");
        assert_eq!(normalize("x^y").unwrap(), "pow(x,y)");
    }

    #[test]
    fn factorials() {
        assert_eq!(normalize("5!").unwrap(), "factorial(5)");
        assert_eq!(normalize("(n+1)!").unwrap(), "factorial((n+1))");
        assert_eq!(normalize("3!!").unwrap(), "factorial(factorial(3))");
        assert_eq!(normalize("2^3!").unwrap(), "factorial(pow(2,3))");
    }

    #[test]
    fn standard_policy_keeps_operators() {
        assert_eq!(normalize_with("2x^3!", ExponentPolicy::Standard).unwrap(), "2*x^3!");
    }

    #[test]
    fn missing_operand() {
        let err = normalize("^2").unwrap_err();
        assert_eq!(err.category(), Category::Syntax);
        assert_eq!(err.spans, vec![0..1]);

        let err = normalize("x^").unwrap_err();
        assert_eq!(err.kind.message(), "missing argument in `x^` at position 1");

        let err = normalize("!").unwrap_err();
        assert_eq!(err.category(), Category::Syntax);
    }

    #[test]
    fn unrecognized_operand() {
        let err = normalize("2+^3").unwrap_err();
        assert_eq!(err.kind.message(), "incorrect syntax in `2+^3` at position 1");
        assert_eq!(err.spans, vec![1..2]);

        let err = normalize("x^*2").unwrap_err();
        assert_eq!(err.spans, vec![2..3]);

        let err = normalize("x)^2").unwrap_err();
        assert_eq!(err.category(), Category::Syntax);
    }
}
