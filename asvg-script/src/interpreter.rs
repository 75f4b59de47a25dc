//! Runs drawing scripts against a [`Picture`].

use asvg_compute::ctxt::Ctxt;
use asvg_error::Error;
use asvg_graph::{picture::axes::ScaleOverrides, Picture, TextPosition};
use asvg_parser::{
    rewrite::ExponentPolicy,
    script::{parse_script, AssignStmt, CallStmt, Script, Stmt},
};
use crate::{
    args::{Args, Env},
    commands::{self, Settings, COMMANDS},
    error::{MissingArgument, TooManyArguments, UnknownCommand, WrongType},
    style,
    value::Value,
};
use levenshtein::levenshtein;
use log::debug;
use std::collections::HashMap;

/// Viewport bounds assigned by a script with `xmin = ..` and friends. They are used by the next
/// `initPicture` call that does not give them explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
}

/// Names that hold a scale override for the axes.
const SCALE_NAMES: [&str; 6] = ["xscl", "yscl", "xtick", "ytick", "xgrid", "ygrid"];

/// Returns the names of commands whose name is close to `name`.
fn similar_commands(name: &str) -> Vec<String> {
    COMMANDS.iter()
        .map(|(command, _)| *command)
        .filter(|command| levenshtein(command, name) <= 2)
        .map(str::to_string)
        .collect()
}

/// Executes drawing scripts.
///
/// The interpreter keeps its variables between runs, so a picture can be built up from several
/// scripts. Each call to [`Interpreter::run`] is a new render pass over the picture: assigned
/// bounds and scale overrides are forgotten, and the picture must be initialized again before
/// the axes are redrawn. [`Interpreter::resume`] continues the current pass instead.
#[derive(Debug)]
pub struct Interpreter {
    /// Script variables, by name.
    vars: HashMap<String, Value>,

    /// How `^` and `!` are resolved in math arguments.
    policy: ExponentPolicy,

    bounds: Bounds,
    overrides: ScaleOverrides,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with the predefined variables: the text positions (`above`,
    /// `belowright`, ..), which evaluate to their own names, and `cpi` and `ctheta`, which hold
    /// the symbols `π` and `θ`.
    pub fn new() -> Self {
        let mut vars = TextPosition::NAMES.iter()
            .map(|name| (name.to_string(), Value::Str(name.to_string())))
            .collect::<HashMap<_, _>>();
        vars.insert("cpi".to_string(), Value::Str("π".to_string()));
        vars.insert("ctheta".to_string(), Value::Str("θ".to_string()));

        Self {
            vars,
            policy: ExponentPolicy::default(),
            bounds: Bounds::default(),
            overrides: ScaleOverrides::default(),
        }
    }

    /// Set the exponent policy used for math arguments. Returns an updated [`Interpreter`] for
    /// chaining.
    pub fn with_policy(mut self, policy: ExponentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the value of a script variable.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn set_var(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }

    /// Parses and runs a script as a new render pass over the picture.
    ///
    /// Execution stops at the first statement that fails; whatever the earlier statements drew
    /// is kept. Spans in the returned error refer to `src`.
    pub fn run(&mut self, src: &str, picture: &mut Picture) -> Result<(), Error> {
        let script = parse_script(src)?;
        self.exec(&script, picture)
    }

    /// Parses and runs a script as a continuation of the current render pass, keeping the style,
    /// bounds and scale overrides left by earlier scripts.
    pub fn resume(&mut self, src: &str, picture: &mut Picture) -> Result<(), Error> {
        let script = parse_script(src)?;
        self.exec_stmts(&script, picture)
    }

    /// Runs a parsed script as a new render pass over the picture.
    pub fn exec(&mut self, script: &Script, picture: &mut Picture) -> Result<(), Error> {
        self.bounds = Bounds::default();
        self.overrides = ScaleOverrides::default();
        picture.begin_pass();
        self.exec_stmts(script, picture)
    }

    fn exec_stmts(&mut self, script: &Script, picture: &mut Picture) -> Result<(), Error> {
        for stmt in &script.stmts {
            match stmt {
                Stmt::Call(call) => self.call(call, picture)?,
                Stmt::Assign(assign) => self.assign(assign, picture)?,
            }
        }
        Ok(())
    }

    /// Builds the environment math arguments are evaluated in: the builtin constants, the
    /// viewport bounds and every numeric script variable.
    ///
    /// Until the picture is initialized, the bounds assigned by the script take the place of the
    /// viewport's.
    fn env(&self, picture: &Picture) -> Env<'_> {
        let mut ctxt = Ctxt::default();
        let viewport = picture.viewport();
        let pending = |assigned: Option<f64>, current: f64| {
            if picture.is_initialized() {
                current
            } else {
                assigned.unwrap_or(current)
            }
        };
        ctxt.add_var("xmin", pending(self.bounds.xmin, viewport.xmin));
        ctxt.add_var("xmax", pending(self.bounds.xmax, viewport.xmax));
        ctxt.add_var("ymin", pending(self.bounds.ymin, viewport.ymin));
        ctxt.add_var("ymax", pending(self.bounds.ymax, viewport.ymax));

        for (name, value) in &self.vars {
            if let Value::Number(n) = value {
                ctxt.add_var(name, *n);
            }
        }

        Env { vars: &self.vars, ctxt, policy: self.policy }
    }

    fn call(&mut self, call: &CallStmt, picture: &mut Picture) -> Result<(), Error> {
        let name = call.name.name.as_str();
        debug!("running `{}` with {} argument(s)", name, call.args.len());

        let Some(arity) = commands::arity(name) else {
            return Err(Error::new(vec![call.name.span.clone()], UnknownCommand {
                name: name.to_string(),
                suggestions: similar_commands(name),
            }));
        };

        let given = call.args.len();
        if let Some(max) = arity.max.filter(|max| given > *max) {
            let extra = call.args[max].span().start..call.args[given - 1].span().end;
            return Err(Error::new(vec![call.name.span.clone(), extra], TooManyArguments {
                name: name.to_string(),
                expected: max,
                given,
            }));
        }
        if given < arity.min {
            return Err(Error::new(vec![call.span.clone()], MissingArgument {
                name: name.to_string(),
                index: given,
                expected: arity.min,
                given,
            }));
        }

        let env = self.env(picture);
        let args = Args {
            name,
            args: &call.args,
            span: call.span.clone(),
            env: &env,
        };
        let settings = Settings {
            bounds: self.bounds,
            overrides: self.overrides,
        };
        commands::run(&args, &settings, picture)
    }

    /// Reads an assigned bound or scale override, which must be a number or `null`.
    fn optional_number(name: &str, value: &Value, stmt: &AssignStmt) -> Result<Option<f64>, Error> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(Some(*n)),
            other => Err(Error::new(vec![stmt.value.span()], WrongType {
                context: name.to_string(),
                expected: "a number",
                found: other.describe(),
            })),
        }
    }

    fn assign(&mut self, stmt: &AssignStmt, picture: &mut Picture) -> Result<(), Error> {
        let name = stmt.target.name.as_str();
        let value = self.env(picture).eval(&stmt.value)?;
        debug!("assigning `{}` = {}", name, value);

        match name {
            "xmin" => self.bounds.xmin = Self::optional_number(name, &value, stmt)?,
            "xmax" => self.bounds.xmax = Self::optional_number(name, &value, stmt)?,
            "ymin" => self.bounds.ymin = Self::optional_number(name, &value, stmt)?,
            "ymax" => self.bounds.ymax = Self::optional_number(name, &value, stmt)?,
            "width" | "height" => {
                let Some(size) = Self::optional_number(name, &value, stmt)? else {
                    return Ok(());
                };
                let options = picture.options();
                let (width, height) = if name == "width" {
                    (size, options.height)
                } else {
                    (options.width, size)
                };
                picture.set_canvas_size(width, height);
            },
            _ if SCALE_NAMES.contains(&name) => {
                let scale = Self::optional_number(name, &value, stmt)?;
                let overrides = &mut self.overrides;
                match name {
                    "xscl" => overrides.xscl = scale,
                    "yscl" => overrides.yscl = scale,
                    "xtick" => overrides.xtick = scale,
                    "ytick" => overrides.ytick = scale,
                    "xgrid" => overrides.xgrid = scale,
                    _ => overrides.ygrid = scale,
                }
            },
            _ if style::is_style(name) => {
                let mut style = picture.style().clone();
                style::assign(&mut style, name, &value)
                    .map_err(|err| err.relocate(stmt.value.span()))?;
                picture.set_style(style);
            },
            _ => self.set_var(name, value),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use asvg_error::Category;
    use asvg_graph::{
        picture::element::{PathData, Shape},
        Element,
        Paint,
        PictureOptions,
    };
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    /// A picture with no background, so that the scene holds only what the script draws.
    fn picture() -> Picture {
        Picture::new(PictureOptions::default().background(None)).unwrap()
    }

    fn run(src: &str) -> Result<Picture, Error> {
        let mut picture = picture();
        Interpreter::new().run(src, &mut picture)?;
        Ok(picture)
    }

    fn path_data(element: &Element) -> String {
        match &element.shape {
            Shape::Path(PathData::Commands(commands)) => commands.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            other => panic!("expected a path, found {:?}", other),
        }
    }

    fn text_content(element: &Element) -> &str {
        match &element.shape {
            Shape::Text { content, .. } => content,
            other => panic!("expected text, found {:?}", other),
        }
    }

    #[test]
    fn line() {
        let picture = run("initPicture()\nline([0,0], [1,2], \"a\")").unwrap();
        let element = picture.scene().get("a").unwrap();
        assert_eq!(path_data(element), "M150,100 L180,40");
        assert_eq!(element.paint, Paint::new("black", "none", 1.0));
    }

    #[test]
    fn style_assignments() {
        let picture = run("initPicture()\nstroke = \"red\"; strokewidth = 2\nline([0,0], [1,2])").unwrap();
        assert_eq!(picture.scene().elements()[0].paint, Paint::new("red", "none", 2.0));
        assert_eq!(picture.style().stroke, "red");
    }

    #[test]
    fn math_arguments() {
        let picture = run("initPicture(-2*5, 10)\nline([0,0], [sqrt(4)*2/2, 1+1])").unwrap();
        assert_float_absolute_eq!(picture.viewport().xmin, -10.0);
        assert_eq!(path_data(&picture.scene().elements()[0]), "M150,100 L165,70");
    }

    #[test]
    fn variables() {
        let mut interpreter = Interpreter::new();
        let mut picture = picture();
        interpreter.run("a = 3\nb = a^2 + 1\nname = \"f\"", &mut picture).unwrap();
        assert_eq!(interpreter.var("b"), Some(&Value::Number(10.0)));
        assert_eq!(interpreter.var("name"), Some(&Value::Str("f".to_string())));
        assert_eq!(interpreter.var("above"), Some(&Value::Str("above".to_string())));
    }

    #[test]
    fn plot_splits_at_asymptote() {
        let picture = run("initPicture()\nplot(1/x)").unwrap();
        assert_eq!(picture.scene().len(), 2);
    }

    #[test]
    fn huge_sample_counts_are_clamped() {
        use asvg_graph::picture::{element::{PathData, Shape}, plot::MAX_SAMPLES};

        for count in ["10^13", "10^20"] {
            let src = format!("initPicture()\nplot(x, -1, 1, {}, \"f\")", count);
            let picture = run(&src).unwrap();
            assert_eq!(picture.scene().len(), 1);
            match &picture.scene().elements()[0].shape {
                Shape::Path(PathData::Commands(commands)) => assert_eq!(commands.len(), MAX_SAMPLES + 1),
                other => panic!("expected path commands, found {:?}", other),
            }
        }
    }

    #[test]
    fn plot_id_in_domain_position() {
        let picture = run("initPicture()\nplot(x^2, \"f\")\nplot(x^2 + 1, \"f\")").unwrap();
        assert_eq!(picture.scene().len(), 1);
        assert!(picture.scene().get("f").is_some());
    }

    #[test]
    fn parametric_plot() {
        let picture = run("initPicture()\nplot([\"cos(t)\", \"sin(t)\"], 0, 2*pi, 50, \"c\")").unwrap();
        assert_eq!(picture.scene().len(), 1);
        assert!(picture.scene().get("c").is_some());
    }

    #[test]
    fn plot_function_from_variable() {
        let picture = run("f = \"x^2\"\ninitPicture()\nplot(f, -1, 1, 4, \"p\")").unwrap();
        assert_eq!(picture.scene().len(), 1);
    }

    #[test]
    fn plot_compile_error_on_argument() {
        let err = run("initPicture()\nplot(x^, -1, 1)").unwrap_err();
        assert_eq!(err.spans, vec![19..21]);
    }

    #[test]
    fn unknown_command() {
        let err = run("lnie([0,0], [1,1])").unwrap_err();
        assert_eq!(err.category(), Category::Evaluation);
        assert_eq!(err.spans, vec![0..4]);
        assert_eq!(err.kind.message(), "the `lnie` command does not exist");
        assert_eq!(similar_commands("lnie"), vec!["line".to_string()]);
    }

    #[test]
    fn too_many_arguments() {
        let err = run("noaxes(1, 2)").unwrap_err();
        assert_eq!(err.category(), Category::Evaluation);
        assert_eq!(err.spans, vec![0..6, 7..11]);
    }

    #[test]
    fn missing_argument() {
        let err = run("circle([0,0])").unwrap_err();
        assert_eq!(err.kind.message(), "missing argument #2 for the `circle` command");
        assert_eq!(err.spans, vec![0..13]);
    }

    #[test]
    fn wrong_type() {
        let err = run("circle(1, 2)").unwrap_err();
        assert_eq!(err.category(), Category::Evaluation);
        assert_eq!(err.spans, vec![7..8]);
        assert_eq!(err.kind.message(), "expected a point `[x, y]`, found a number");
    }

    #[test]
    fn math_error_on_argument() {
        let err = run("line([0,0],[1,2+])").unwrap_err();
        assert_eq!(err.spans, vec![14..16]);
    }

    #[test]
    fn abort_on_error() {
        let mut picture = picture();
        let err = Interpreter::new()
            .run("initPicture()\nline([0,0], [1,1])\nbogus()\nline([0,0], [2,2])", &mut picture)
            .unwrap_err();
        assert_eq!(err.category(), Category::Evaluation);
        assert_eq!(picture.scene().len(), 1);
    }

    #[test]
    fn ymax_without_ymin() {
        let err = run("ymax = 3\ninitPicture()").unwrap_err();
        assert_eq!(err.category(), Category::Configuration);
    }

    #[test]
    fn unknown_marker() {
        let err = run("marker = \"star\"").unwrap_err();
        assert_eq!(err.category(), Category::UnsupportedOperation);
        assert_eq!(err.spans, vec![9..15]);
    }

    #[test]
    fn bad_bound() {
        let err = run("xmin = \"left\"").unwrap_err();
        assert_eq!(err.kind.message(), "expected a number, found a string");
        assert_eq!(err.spans, vec![7..13]);
    }

    #[test]
    fn pending_bounds() {
        let picture = run("xmin = -2\nline([xmin, 0], [0, 0])").unwrap();
        assert_eq!(path_data(&picture.scene().elements()[0]), "M90,100 L150,100");

        let picture = run("xmin = -10; xmax = 10\ninitPicture()").unwrap();
        assert_float_absolute_eq!(picture.viewport().xmin, -10.0);
        assert_float_absolute_eq!(picture.viewport().xmax, 10.0);

        let picture = run("xmin = -10\ninitPicture(-1, 1)").unwrap();
        assert_float_absolute_eq!(picture.viewport().xmin, -1.0);
    }

    #[test]
    fn canvas_size() {
        let picture = run("width = 400; height = 300\ninitPicture()").unwrap();
        assert_float_absolute_eq!(picture.viewport().width, 400.0);
        assert_float_absolute_eq!(picture.viewport().height, 300.0);
    }

    #[test]
    fn scale_overrides() {
        let mut interpreter = Interpreter::new();
        let mut picture = picture();
        interpreter.run("xscl = 2\naxes()", &mut picture).unwrap();
        assert_eq!(interpreter.overrides.xscl, Some(2.0));
        assert!(picture.is_initialized());

        interpreter.run("axes()", &mut picture).unwrap();
        assert_eq!(interpreter.overrides.xscl, None);
    }

    #[test]
    fn new_pass_resets_style() {
        let mut interpreter = Interpreter::new();
        let mut picture = picture();
        interpreter.run("initPicture()\nstroke = \"red\"\nline([0,0], [1,1], \"a\")", &mut picture).unwrap();
        interpreter.run("line([0,0], [2,2], \"b\")", &mut picture).unwrap();
        assert_eq!(picture.scene().len(), 2);
        assert_eq!(picture.scene().get("a").unwrap().paint.stroke.as_deref(), Some("red"));
        assert_eq!(picture.scene().get("b").unwrap().paint.stroke.as_deref(), Some("black"));
    }

    #[test]
    fn resume_keeps_style() {
        let mut interpreter = Interpreter::new();
        let mut picture = picture();
        interpreter.run("initPicture()\nstroke = \"red\"", &mut picture).unwrap();
        interpreter.resume("line([0,0], [2,2], \"b\")", &mut picture).unwrap();
        assert!(picture.is_initialized());
        assert_eq!(picture.scene().get("b").unwrap().paint.stroke.as_deref(), Some("red"));
    }

    #[test]
    fn predefined_symbols() {
        let picture = run("initPicture()\ntext([0,0], cpi, above, \"pi\")").unwrap();
        assert_eq!(text_content(picture.scene().get("pi").unwrap()), "π");
    }

    #[test]
    fn point_variable_with_label() {
        let picture = run("initPicture()\np = [1, 2]\ndot(p, \"open\", \"P\", null, \"d\")").unwrap();
        match &picture.scene().get("d").unwrap().shape {
            Shape::Circle { center, .. } => {
                assert_float_absolute_eq!(center.0, 180.0);
                assert_float_absolute_eq!(center.1, 40.0);
            },
            other => panic!("expected a circle, found {:?}", other),
        }
        assert_eq!(text_content(picture.scene().get("dlabel").unwrap()), "P");
    }

    #[test]
    fn raw_path() {
        let picture = run("initPicture()\npath(\"M0,0 L10,10\", \"r\")").unwrap();
        assert_eq!(
            picture.scene().get("r").unwrap().shape,
            Shape::Path(PathData::Raw("M0,0 L10,10".to_string())),
        );
    }

    #[test]
    fn smooth_path() {
        let picture = run("initPicture()\npath([[0,0], [1,1], [2,0]], \"s\", \"T\")").unwrap();
        assert_eq!(path_data(picture.scene().get("s").unwrap()), "M150,100 T180,70 T210,100");
    }

    #[test]
    fn slope_field() {
        let picture = run("initPicture()\nslopefield(x - y)").unwrap();
        assert_eq!(picture.scene().len(), 1);

        let err = run("initPicture()\nslopefield([\"t\", \"t\"])").unwrap_err();
        assert_eq!(err.category(), Category::Evaluation);
    }

    #[test]
    fn demo_parabola() {
        let picture = run(include_str!("../../demos/parabola.asvg")).unwrap();
        assert!(picture.scene().get("parabola").is_some());
        assert!(picture.scene().get("chord").is_some());
        assert_eq!(picture.style().stroke_width, 2.0);
    }

    #[test]
    fn demo_unit_circle() {
        let picture = run(include_str!("../../demos/unit_circle.asvg")).unwrap();
        for id in ["circle", "radius", "p", "plabel", "angle", "theta"] {
            assert!(picture.scene().get(id).is_some(), "missing `{}`", id);
        }
        assert_eq!(text_content(picture.scene().get("theta").unwrap()), "θ");
    }

    #[test]
    fn demo_slope_field() {
        let picture = run(include_str!("../../demos/slope_field.asvg")).unwrap();
        assert_float_absolute_eq!(picture.viewport().xmin, -3.0);
        assert_float_absolute_eq!(picture.viewport().ymax, 2.0);
        assert!(picture.scene().get("solution").is_some());
    }
}
