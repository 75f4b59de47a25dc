//! Named constants available to every expression.

use std::f64::consts;

/// Every named constant, paired with its name.
pub const ALL: [(&str, f64); 10] = [
    ("pi", consts::PI),
    ("e", consts::E),
    ("E", consts::E),
    ("PI", consts::PI),
    ("LN2", consts::LN_2),
    ("LN10", consts::LN_10),
    ("LOG2E", consts::LOG2_E),
    ("LOG10E", consts::LOG10_E),
    ("SQRT2", consts::SQRT_2),
    ("SQRT1_2", consts::FRAC_1_SQRT_2),
];
