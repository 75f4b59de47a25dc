//! Function plotting.
//!
//! A function is sampled at equally spaced points of its domain, then the samples are split into
//! runs of points that lie within the vertical range of the viewport. Each run is drawn as its
//! own path, so that curves are not connected across asymptotes or through regions where the
//! function is undefined.
//!
//! The cut at the edge of the viewport is approximate: a run that leaves the viewport ends with
//! the first sample outside it, so the last segment points toward the edge without being
//! intersected with it.

use asvg_compute::{compile::{compile_with, CompiledExpr}, ctxt::Ctxt};
use asvg_error::Error;
use asvg_parser::rewrite::ExponentPolicy;
use log::{debug, trace, warn};
use rayon::prelude::*;
use super::{point::UnitPoint, primitives::PathKind, viewport::Viewport, Picture};

/// The number of samples taken when none is given.
pub const DEFAULT_SAMPLES: usize = 200;

/// The largest number of steps a plot is divided into.
pub const MAX_SAMPLES: usize = 100_000;

/// A function to plot.
#[derive(Clone, Debug)]
pub enum Function {
    /// `y = f(x)`, compiled with the parameter `x`.
    Explicit(CompiledExpr),

    /// `(x(t), y(t))`, both compiled with the parameter `t`.
    Parametric(CompiledExpr, CompiledExpr),
}

impl Function {
    /// Compiles `y = f(x)` from shorthand notation.
    pub fn explicit(src: &str, ctxt: &Ctxt, policy: ExponentPolicy) -> Result<Function, Error> {
        Ok(Function::Explicit(compile_with(src, &["x"], ctxt, policy)?))
    }

    /// Compiles `(x(t), y(t))` from shorthand notation.
    pub fn parametric(
        x: &str,
        y: &str,
        ctxt: &Ctxt,
        policy: ExponentPolicy,
    ) -> Result<Function, Error> {
        Ok(Function::Parametric(
            compile_with(x, &["t"], ctxt, policy)?,
            compile_with(y, &["t"], ctxt, policy)?,
        ))
    }

    /// Evaluates the function at the given value of its parameter.
    pub fn point(&self, t: f64) -> UnitPoint {
        match self {
            Function::Explicit(f) => UnitPoint(t, f.eval(&[t])),
            Function::Parametric(x, y) => UnitPoint(x.eval(&[t]), y.eval(&[t])),
        }
    }
}

/// Options to use when plotting a function.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotOptions {
    /// The start of the domain. Defaults to the left edge of the viewport.
    pub min: Option<f64>,

    /// The end of the domain. Defaults to the right edge of the viewport.
    pub max: Option<f64>,

    /// The number of steps to divide the domain into. At least one step is always taken.
    ///
    /// The default value is [`DEFAULT_SAMPLES`].
    pub samples: usize,

    /// The identity of the first drawn run.
    pub id: Option<String>,
}

impl Default for PlotOptions {
    fn default() -> PlotOptions {
        PlotOptions {
            min: None,
            max: None,
            samples: DEFAULT_SAMPLES,
            id: None,
        }
    }
}

impl PlotOptions {
    /// Set the domain. Returns an updated [`PlotOptions`] for chaining.
    pub fn domain(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the number of samples. Returns an updated [`PlotOptions`] for chaining.
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the identity. Returns an updated [`PlotOptions`] for chaining.
    pub fn id(mut self, id: Option<&str>) -> Self {
        self.id = id.map(str::to_string);
        self
    }
}

/// Samples the function at `samples + 1` equally spaced values from `min` to just short of
/// `max`. The step is shrunk by a millionth of the domain, so that rounding never pushes the
/// last sample past `max`.
///
/// Returns no samples if the domain is empty. More than [`MAX_SAMPLES`] steps are clamped.
pub fn sample(function: &Function, min: f64, max: f64, samples: usize) -> Vec<UnitPoint> {
    if !(min < max) {
        return Vec::new();
    }

    if samples > MAX_SAMPLES {
        warn!("plot clamped from {} to {} samples", samples, MAX_SAMPLES);
    }
    let samples = samples.clamp(1, MAX_SAMPLES);
    let step = (max - min - 0.000001 * (max - min)) / samples as f64;
    (0..=samples)
        .into_par_iter()
        .map(|i| function.point(min + i as f64 * step))
        .collect()
}

/// Splits samples into runs of points within the vertical range of the viewport.
///
/// A run begins at the first visible sample after an invisible one, and a run that is ended by
/// an invisible sample includes that sample as its last point, unless the sample is undefined or
/// infinite.
pub fn split_runs(points: &[UnitPoint], viewport: &Viewport) -> Vec<Vec<UnitPoint>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for point in points {
        if point.0.is_finite() && viewport.contains_y(point.1) {
            current.push(*point);
        } else if !current.is_empty() {
            if point.0.is_finite() && point.1.is_finite() {
                current.push(*point);
            }
            runs.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

impl Picture {
    /// Plots a function, drawing one path per run of visible samples. Returns the number of paths
    /// drawn.
    ///
    /// Only the first path receives the identity in `options`; the rest are anonymous.
    pub fn plot(&mut self, function: &Function, options: &PlotOptions) -> usize {
        let min = options.min.unwrap_or(self.viewport.xmin);
        let max = options.max.unwrap_or(self.viewport.xmax);
        let points = sample(function, min, max, options.samples);
        let runs = split_runs(&points, &self.viewport);
        debug!("plotting over [{}, {}]: {} samples, {} runs", min, max, points.len(), runs.len());

        for (i, run) in runs.iter().enumerate() {
            trace!("run {}: {} points from {:?} to {:?}", i, run.len(), run.first(), run.last());
            let id = if i == 0 { options.id.as_deref() } else { None };
            self.path(run, id, PathKind::Polyline);
        }
        runs.len()
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::picture::opts::PictureOptions;
    use pretty_assertions::assert_eq;
    use super::*;

    fn explicit(src: &str) -> Function {
        Function::explicit(src, &Ctxt::default(), ExponentPolicy::default()).unwrap()
    }

    fn picture(ymin: f64, ymax: f64) -> Picture {
        let mut picture = Picture::new(PictureOptions::default().background(None)).unwrap();
        picture.init(Some(-5.0), Some(5.0), Some(ymin), Some(ymax)).unwrap();
        picture
    }

    #[test]
    fn sample_spacing() {
        let points = sample(&explicit("x"), -1.0, 1.0, 4);
        assert_eq!(points.len(), 5);
        assert_float_absolute_eq!(points[0].0, -1.0);
        assert_float_absolute_eq!(points[2].0, 0.0, 1e-5);
        assert!(points[4].0 < 1.0);
        assert!(sample(&explicit("x"), 1.0, 1.0, 4).is_empty());
    }

    #[test]
    fn parabola_is_one_run() {
        let viewport = Viewport::new(300.0, 200.0, -1.0, 1.0, Some(-1.0), Some(1.0)).unwrap();
        let points = sample(&explicit("x^2"), -1.0, 1.0, 4);
        let runs = split_runs(&points, &viewport);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 5);
        assert!(runs[0].windows(2).all(|w| w[0].0 < w[1].0));
        assert!(runs[0].iter().all(|p| (-1.0..=1.0).contains(&p.1)));
    }

    #[test]
    fn asymptote_splits_runs() {
        let viewport = Viewport::new(300.0, 200.0, -1.0, 1.0, Some(-10.0), Some(10.0)).unwrap();
        let points = sample(&explicit("1/x"), -1.0, 1.0, 100);
        let runs = split_runs(&points, &viewport);
        assert_eq!(runs.len(), 2);
        assert!(runs[0].iter().all(|p| p.0 < 0.0));
        assert!(runs[1].iter().all(|p| p.0 > 0.0));
    }

    #[test]
    fn run_ends_with_first_invisible_sample() {
        let viewport = Viewport::new(300.0, 200.0, -5.0, 5.0, Some(-1.0), Some(1.0)).unwrap();
        let points = [
            UnitPoint(0.0, 5.0),
            UnitPoint(1.0, 0.5),
            UnitPoint(2.0, 0.0),
            UnitPoint(3.0, f64::NAN),
            UnitPoint(4.0, f64::INFINITY),
            UnitPoint(5.0, 0.0),
        ];
        let runs = split_runs(&points, &viewport);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![UnitPoint(1.0, 0.5), UnitPoint(2.0, 0.0)]);
        assert_eq!(runs[1], vec![UnitPoint(5.0, 0.0)]);

        let points = [UnitPoint(0.0, 0.0), UnitPoint(1.0, 3.0), UnitPoint(2.0, 0.0)];
        let runs = split_runs(&points, &viewport);
        assert_eq!(runs, vec![
            vec![UnitPoint(0.0, 0.0), UnitPoint(1.0, 3.0)],
            vec![UnitPoint(2.0, 0.0)],
        ]);
    }

    #[test]
    fn undefined_sample_ends_run_without_joining() {
        let viewport = Viewport::new(300.0, 200.0, -5.0, 5.0, Some(-5.0), Some(5.0)).unwrap();
        let points = sample(&explicit("sqrt(x)"), -1.0, 1.0, 4);
        let runs = split_runs(&points, &viewport);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].iter().all(|p| p.0 >= 0.0 && p.1.is_finite()));

        let mut picture = picture(-5.0, 5.0);
        let drawn = picture.plot(&explicit("sqrt(1-x^2)"), &PlotOptions::default().domain(Some(-2.0), Some(2.0)).samples(4));
        assert_eq!(drawn, 1);
        for element in picture.scene().elements() {
            let data = match &element.shape {
                crate::picture::element::Shape::Path(data) => data.to_string(),
                other => panic!("expected a path, found {:?}", other),
            };
            assert!(!data.contains("NaN") && !data.contains("inf"), "{}", data);
        }
    }

    #[test]
    fn sample_count_is_clamped() {
        let points = sample(&explicit("x"), -1.0, 1.0, usize::MAX);
        assert_eq!(points.len(), MAX_SAMPLES + 1);
        assert_float_absolute_eq!(points[0].0, -1.0);
        assert!(points[MAX_SAMPLES].0 < 1.0);
    }

    #[test]
    fn plot_identity_on_first_run() {
        let mut picture = picture(-10.0, 10.0);
        let drawn = picture.plot(&explicit("1/x"), &PlotOptions::default().id(Some("hyperbola")));
        assert_eq!(drawn, 2);
        assert_eq!(picture.scene().len(), 2);
        assert_eq!(picture.scene().elements()[0].id.as_deref(), Some("hyperbola"));
        assert_eq!(picture.scene().elements()[1].id, None);
    }

    #[test]
    fn plot_parametric() {
        let mut picture = picture(-5.0, 5.0);
        let circle = Function::parametric("cos(t)", "sin(t)", &Ctxt::default(), ExponentPolicy::default())
            .unwrap();
        let options = PlotOptions::default().domain(Some(0.0), Some(2.0 * std::f64::consts::PI)).samples(50);
        assert_eq!(picture.plot(&circle, &options), 1);
    }

    #[test]
    fn undefined_points_are_not_errors() {
        let mut picture = picture(-5.0, 5.0);
        assert_eq!(picture.plot(&explicit("sqrt(x)"), &PlotOptions::default()), 1);
        assert_eq!(picture.plot(&explicit("ln(-1)"), &PlotOptions::default()), 0);
    }

    #[test]
    fn malformed_functions_fail_to_compile() {
        assert!(Function::explicit("x^", &Ctxt::default(), ExponentPolicy::default()).is_err());
        assert!(Function::explicit("t + 1", &Ctxt::default(), ExponentPolicy::default()).is_err());
    }
}
