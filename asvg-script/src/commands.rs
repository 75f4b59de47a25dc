//! The commands a script can call.

use asvg_compute::builtin::Arity;
use asvg_error::Error;
use asvg_graph::{
    picture::{
        axes::{Axes, ScaleOverrides},
        plot::{Function, PlotOptions, DEFAULT_SAMPLES},
        slope_field::compile_slope,
    },
    DotKind,
    PathKind,
    Picture,
    TextPosition,
};
use crate::{
    args::{Args, FunctionSource},
    error::WrongType,
    interpreter::Bounds,
    value::Value,
};

/// Every command, with the number of arguments it accepts.
pub const COMMANDS: &[(&str, Arity)] = &[
    ("initPicture", Arity::between(0, 4)),
    ("line", Arity::between(2, 3)),
    ("path", Arity::between(1, 3)),
    ("curve", Arity::between(1, 2)),
    ("circle", Arity::between(2, 3)),
    ("ellipse", Arity::between(3, 4)),
    ("rect", Arity::between(2, 5)),
    ("arc", Arity::between(2, 4)),
    ("loop", Arity::between(1, 3)),
    ("dot", Arity::between(1, 5)),
    ("text", Arity::between(2, 5)),
    ("arrowhead", Arity::exactly(2)),
    ("plot", Arity::between(1, 5)),
    ("slopefield", Arity::between(1, 3)),
    ("axes", Arity::between(0, 5)),
    ("grid", Arity::between(0, 2)),
    ("noaxes", Arity::exactly(0)),
];

/// Returns the arity of the command, or [`None`] if it does not exist.
pub fn arity(name: &str) -> Option<Arity> {
    COMMANDS.iter().find(|(command, _)| *command == name).map(|(_, arity)| *arity)
}

/// The state of the interpreter that commands read.
#[derive(Debug)]
pub struct Settings {
    /// Viewport bounds assigned by the script, used when `initPicture` omits them.
    pub bounds: Bounds,

    pub overrides: ScaleOverrides,
}

/// Initializes the picture with the given bounds, filling in the bounds assigned by the script.
fn init(picture: &mut Picture, bounds: Bounds, args: &Args) -> Result<(), Error> {
    picture
        .init(bounds.xmin, bounds.xmax, bounds.ymin, bounds.ymax)
        .map_err(|err| err.relocate(args.span.clone()))
}

/// Initializes the picture with the bounds assigned by the script, if it was not initialized
/// during this pass.
fn ensure_init(picture: &mut Picture, settings: &Settings, args: &Args) -> Result<(), Error> {
    if picture.is_initialized() {
        Ok(())
    } else {
        init(picture, settings.bounds, args)
    }
}

fn compile_function(args: &Args, index: usize) -> Result<Function, Error> {
    let env = args.env;
    let function = match args.function(index)? {
        FunctionSource::Explicit(f) => Function::explicit(&f, &env.ctxt, env.policy),
        FunctionSource::Parametric(x, y) => Function::parametric(&x, &y, &env.ctxt, env.policy),
    };
    function.map_err(|err| err.relocate(args.span(index)))
}

fn plot(args: &Args, picture: &mut Picture) -> Result<(), Error> {
    let function = compile_function(args, 0)?;

    // a string in place of the domain is the identity
    let mut options = PlotOptions::default();
    if let Value::Str(id) = args.value(1)? {
        options.id = Some(id);
    } else {
        options.min = args.opt_number(1)?;
        options.max = args.opt_number(2)?;
        options.id = args.opt_string(4)?;
    }

    if let Some(samples) = args.opt_number(3)? {
        if !(samples >= 1.0 && samples.is_finite()) {
            return Err(Error::new(vec![args.span(3)], WrongType {
                context: args.name.to_string(),
                expected: "a positive number of samples",
                found: "a number",
            }));
        }
        options.samples = samples as usize;
    } else {
        options.samples = DEFAULT_SAMPLES;
    }

    picture.plot(&function, &options);
    Ok(())
}

fn slope_field(args: &Args, picture: &mut Picture) -> Result<(), Error> {
    let env = args.env;
    let source = match args.function(0)? {
        FunctionSource::Explicit(source) => source,
        FunctionSource::Parametric(..) => return Err(Error::new(vec![args.span(0)], WrongType {
            context: args.name.to_string(),
            expected: "an expression in `x` and `y`",
            found: "a pair of expressions",
        })),
    };
    let slope = compile_slope(&source, &env.ctxt, env.policy)
        .map_err(|err| err.relocate(args.span(0)))?;
    picture.slope_field(&slope, args.opt_number(1)?, args.opt_number(2)?)
        .map_err(|err| err.relocate(args.span.clone()))?;
    Ok(())
}

/// Reads the arguments of `axes(dx, dy, labels, gdx, gdy)`.
///
/// A string in place of `dx` turns on the labels, and a string in place of `dy` turns on the
/// grid. Labels are drawn for any `labels` argument other than `null` or `false`. A grid is drawn
/// when `gdx` is given; a string `gdx` uses the tick spacing.
fn axes_args(args: &Args) -> Result<Axes, Error> {
    let mut axes = Axes::default();

    match args.value(0)? {
        Value::Str(_) => axes.labels = true,
        _ => axes.dx = args.opt_number(0)?,
    }
    match args.value(1)? {
        Value::Str(_) => axes.grid = true,
        _ => axes.dy = args.opt_number(1)?,
    }
    if !matches!(args.value(2)?, Value::Null | Value::Bool(false)) {
        axes.labels = true;
    }
    match args.value(3)? {
        Value::Null => (),
        Value::Str(_) => axes.grid = true,
        _ => {
            axes.grid = true;
            axes.gdx = args.opt_number(3)?;
        },
    }
    axes.gdy = args.opt_number(4)?;
    Ok(axes)
}

/// Runs a command. The arguments must have been checked against the command's arity.
pub fn run(args: &Args, settings: &Settings, picture: &mut Picture) -> Result<(), Error> {
    match args.name {
        "initPicture" => {
            let bounds = Bounds {
                xmin: args.opt_number(0)?.or(settings.bounds.xmin),
                xmax: args.opt_number(1)?.or(settings.bounds.xmax),
                ymin: args.opt_number(2)?.or(settings.bounds.ymin),
                ymax: args.opt_number(3)?.or(settings.bounds.ymax),
            };
            init(picture, bounds, args)?;
        },
        "line" => picture.line(args.point(0)?, args.point(1)?, args.opt_string(2)?.as_deref()),
        "path" => {
            let id = args.opt_string(1)?;
            if let Value::Str(raw) = args.value(0)? {
                picture.raw_path(&raw, id.as_deref());
            } else {
                let kind = args.opt_parse::<PathKind>(2)?.unwrap_or_default();
                picture.path(&args.points(0)?, id.as_deref(), kind);
            }
        },
        "curve" => picture.curve(&args.points(0)?, args.opt_string(1)?.as_deref()),
        "circle" => picture.circle(args.point(0)?, args.number(1)?, args.opt_string(2)?.as_deref()),
        "ellipse" => picture.ellipse(
            args.point(0)?,
            args.number(1)?,
            args.number(2)?,
            args.opt_string(3)?.as_deref(),
        ),
        "rect" => picture.rect(
            args.point(0)?,
            args.point(1)?,
            args.opt_string(2)?.as_deref(),
            args.opt_number(3)?,
            args.opt_number(4)?,
        ),
        "arc" => picture.arc(
            args.point(0)?,
            args.point(1)?,
            args.opt_number(2)?,
            args.opt_string(3)?.as_deref(),
        ),
        "loop" => picture.loop_(args.point(0)?, args.opt_point(1)?, args.opt_string(2)?.as_deref()),
        "dot" => picture.dot(
            args.point(0)?,
            args.opt_parse::<DotKind>(1)?.unwrap_or_default(),
            args.opt_string(2)?.as_deref(),
            args.opt_parse::<TextPosition>(3)?,
            args.opt_string(4)?.as_deref(),
        ),
        "text" => picture.text(
            args.point(0)?,
            &args.text(1)?,
            args.opt_parse::<TextPosition>(2)?,
            args.opt_string(3)?.as_deref(),
            args.opt_string(4)?.as_deref(),
        ),
        "arrowhead" => picture.arrowhead(args.point(0)?, args.point(1)?),
        "plot" => plot(args, picture)?,
        "slopefield" => slope_field(args, picture)?,
        "axes" => {
            let axes = settings.overrides.apply(axes_args(args)?);
            ensure_init(picture, settings, args)?;
            picture.axes(&axes).map_err(|err| err.relocate(args.span.clone()))?;
        },
        "grid" => {
            let axes = settings.overrides.apply(Axes::grid(args.opt_number(0)?, args.opt_number(1)?));
            ensure_init(picture, settings, args)?;
            picture.axes(&axes).map_err(|err| err.relocate(args.span.clone()))?;
        },
        "noaxes" => ensure_init(picture, settings, args)?,
        _ => (),
    }
    Ok(())
}
