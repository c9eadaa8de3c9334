//! Predefined analytic function/derivative pairs for the Newton
//! kernel.  The engine does not parse user-supplied formulas; a
//! caller picks one of these pairs (or builds its own `Function` from
//! plain function pointers) and hands it in as a parameter.  The
//! `FUNCTIONS` table exists so a UI can enumerate the choices without
//! any process-wide registry.
use std::f64::consts::PI;

use num::Complex;

/// A complex analytic function paired with its derivative, as needed
/// by one step of Newton's method.
#[derive(Copy, Clone)]
pub struct Function {
    /// Short name used for lookup and display.
    pub name: &'static str,
    f: fn(Complex<f64>) -> Complex<f64>,
    df: fn(Complex<f64>) -> Complex<f64>,
}

impl Function {
    /// Builds a pair from two plain function pointers.
    pub const fn new(
        name: &'static str,
        f: fn(Complex<f64>) -> Complex<f64>,
        df: fn(Complex<f64>) -> Complex<f64>,
    ) -> Function {
        Function { name, f, df }
    }

    /// Evaluates f(z).
    pub fn eval(&self, z: Complex<f64>) -> Complex<f64> {
        (self.f)(z)
    }

    /// Evaluates f'(z).
    pub fn deriv(&self, z: Complex<f64>) -> Complex<f64> {
        (self.df)(z)
    }

    /// One relaxed Newton-Raphson step: `z - a * f(z)/f'(z)`.
    pub fn newton_step(&self, z: Complex<f64>, a: f64) -> Complex<f64> {
        z - (self.eval(z) / self.deriv(z)).scale(a)
    }

    /// Looks a function up in the predefined table by name.
    pub fn by_name(name: &str) -> Option<Function> {
        FUNCTIONS.iter().find(|f| f.name == name).cloned()
    }
}

impl ::std::fmt::Debug for Function {
    fn fmt(&self, fmt: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(fmt, "Function({})", self.name)
    }
}

fn f_sine(z: Complex<f64>) -> Complex<f64> {
    z.sin()
}

fn df_sine(z: Complex<f64>) -> Complex<f64> {
    z.cos()
}

fn f_cosine(z: Complex<f64>) -> Complex<f64> {
    z.cos()
}

fn df_cosine(z: Complex<f64>) -> Complex<f64> {
    -z.sin()
}

fn f_trig(z: Complex<f64>) -> Complex<f64> {
    z.sin().cos() - Complex::new(PI, 0.0)
}

fn df_trig(z: Complex<f64>) -> Complex<f64> {
    -(z.cos() * z.sin().sin())
}

fn f_cubic(z: Complex<f64>) -> Complex<f64> {
    z * z * z + Complex::new(1.0, 0.0)
}

fn df_cubic(z: Complex<f64>) -> Complex<f64> {
    Complex::new(3.0, 0.0) * z * z
}

/// sin(z), whose basins tile the real axis.
pub const SINE: Function = Function::new("sine", f_sine, df_sine);
/// cos(z).
pub const COSINE: Function = Function::new("cosine", f_cosine, df_cosine);
/// cos(sin(z)) - pi, a composite whose roots all lie off the real
/// axis, which makes for busy basin boundaries.
pub const TRIG: Function = Function::new("trig", f_trig, df_trig);
/// z^3 + 1, the classic three-root Newton fractal.
pub const CUBIC: Function = Function::new("cubic", f_cubic, df_cubic);

/// The predefined pairs, in the order a UI should present them.
pub const FUNCTIONS: &[Function] = &[SINE, COSINE, TRIG, CUBIC];
