/// Builds builtin functions that take exactly one argument.
///
/// Each function becomes a unit `struct` with an `eval_static` method and a [`Builtin`]
/// implementation.
///
/// [`Builtin`]: crate::builtin::Builtin
macro_rules! build_unary {
    ($($name:literal $upname:ident; $func:expr),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(n: f64) -> f64 {
                    // NOTE: the closure call is contained within the macro, so we allow
                    // the clippy::redundant_closure_call lint
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(n)
                }
            }

            impl $crate::builtin::Builtin for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn arity(&self) -> $crate::builtin::Arity {
                    $crate::builtin::Arity::exactly(1)
                }

                fn eval(&self, args: &[f64]) -> f64 {
                    Self::eval_static($crate::builtin::arg_or(args, 0, f64::NAN))
                }
            }
        )*
    };
}
