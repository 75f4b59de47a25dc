//! General trigonometric and hyperbolic trigonometric functions. Angles are in radians.

build_unary! {
    "sin" Sin; f64::sin,
    "cos" Cos; f64::cos,
    "tan" Tan; f64::tan,
    "sec" Sec; |n: f64| 1.0 / n.cos(),
    "csc" Csc; |n: f64| 1.0 / n.sin(),
    "cot" Cot; |n: f64| 1.0 / n.tan(),
}

build_unary! {
    "arcsin" Asin; f64::asin,
    "arccos" Acos; f64::acos,
    "arctan" Atan; f64::atan,
    "arcsec" Asec; |n: f64| (1.0 / n).acos(),
    "arccsc" Acsc; |n: f64| (1.0 / n).asin(),
    "arccot" Acot; |n: f64| (1.0 / n).atan(),
}

build_unary! {
    "sinh" Sinh; f64::sinh,
    "cosh" Cosh; f64::cosh,
    "tanh" Tanh; f64::tanh,
    "sech" Sech; |n: f64| 1.0 / n.cosh(),
    "csch" Csch; |n: f64| 1.0 / n.sinh(),
    "coth" Coth; |n: f64| 1.0 / n.tanh(),
}

build_unary! {
    "arcsinh" Asinh; f64::asinh,
    "arccosh" Acosh; f64::acosh,
    "arctanh" Atanh; f64::atanh,
    "arcsech" Asech; |n: f64| (1.0 / n).acosh(),
    "arccsch" Acsch; |n: f64| (1.0 / n).asinh(),
    "arccoth" Acoth; |n: f64| (1.0 / n).atanh(),
}
