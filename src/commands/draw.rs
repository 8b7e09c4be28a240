use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::canvas::{CanvasConfig, LineCap, LineJoin, RasterCanvas, Render, SvgCanvas};
use crate::cli_util::print_draw_error;
use crate::config;
use crate::Interpreter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Guess the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        OutputFormat::from_str(ext, true).ok()
    }
}

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct DrawArgs {
    /// Output image (*.png or *.svg)
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Read instructions from PATH instead of positional text or STDIN
    #[arg(short = 'i', long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Width of the image canvas
    #[arg(short = 'w', long = "width", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Height of the image canvas
    #[arg(short = 'H', long = "height", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// X of the starting point (default: width/2)
    #[arg(short = 'x', long = "origin-x", alias = "origin_x", allow_negative_numbers = true)]
    pub origin_x: Option<f64>,

    /// Y of the starting point (default: height/2)
    #[arg(short = 'y', long = "origin-y", alias = "origin_y", allow_negative_numbers = true)]
    pub origin_y: Option<f64>,

    /// Multiply every distance by this factor
    #[arg(short = 's', long = "scale", value_parser = positive_f64)]
    pub scale: Option<f64>,

    /// Width of the line stroke
    #[arg(short = 'l', long = "line-width", alias = "line_width", value_parser = positive_f64)]
    pub line_width: Option<f64>,

    /// Shape of line ends
    #[arg(short = 'c', long = "line-cap", alias = "line_cap", value_enum)]
    pub line_cap: Option<LineCap>,

    /// Shape of line joints
    #[arg(short = 'j', long = "line-join", alias = "line_join", value_enum)]
    pub line_join: Option<LineJoin>,

    /// Output format (default: from the --out extension)
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Maximum number of saved states on the stack
    #[arg(long = "max-stack", value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_stack: Option<u64>,

    /// Print a step-by-step table of executed commands
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Instruction text (parts are concatenated)
    #[arg(value_name = "PROGRAM", trailing_var_arg = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

fn positive_f64(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("must be greater than 0 (got {s})"))
    }
}

/// Everything the interpreter needs besides the canvas.
struct RunSettings {
    scale: f64,
    max_stack: usize,
    debug: bool,
}

pub fn run(program: &str, args: DrawArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let Some(out) = args.out.clone() else {
        eprintln!("{program}: missing required --out FILE");
        usage_and_exit(program, 2);
    };

    if args.input.is_some() && !args.code.is_empty() {
        eprintln!("{program}: cannot use positional PROGRAM together with --in");
        usage_and_exit(program, 2);
    }

    let Some(format) = args.format.or_else(|| OutputFormat::from_path(&out)) else {
        eprintln!(
            "{program}: cannot tell the image format of {}; use --format png|svg",
            out.display()
        );
        let _ = io::stderr().flush();
        return 2;
    };

    let code: Vec<u8> = match (&args.input, args.code.is_empty()) {
        (Some(path), _) => match fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("{program}: error opening file {}: {e}", path.display());
                let _ = io::stderr().flush();
                return 1;
            }
        },
        (None, false) => args.code.join("").into_bytes(),
        (None, true) => {
            let mut buf = Vec::new();
            if let Err(e) = io::stdin().lock().read_to_end(&mut buf) {
                eprintln!("{program}: failed reading stdin: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
            buf
        }
    };

    // Resolve settings: flags -> config file -> built-in defaults
    let defaults = config::defaults();
    let width = args.width.unwrap_or(defaults.width);
    let height = args.height.unwrap_or(defaults.height);
    let canvas_config = CanvasConfig {
        width,
        height,
        origin_x: args.origin_x.unwrap_or(f64::from(width) / 2.0),
        origin_y: args.origin_y.unwrap_or(f64::from(height) / 2.0),
        line_width: args.line_width.unwrap_or(defaults.line_width),
        line_cap: args.line_cap.unwrap_or(defaults.line_cap),
        line_join: args.line_join.unwrap_or(defaults.line_join),
    };
    let settings = RunSettings {
        scale: args.scale.unwrap_or(defaults.scale),
        max_stack: args
            .max_stack
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
            .unwrap_or(defaults.max_stack_depth),
        debug: args.debug,
    };

    match format {
        OutputFormat::Png => draw_with::<RasterCanvas>(program, &canvas_config, &settings, &code, &out),
        OutputFormat::Svg => draw_with::<SvgCanvas>(program, &canvas_config, &settings, &code, &out),
    }
}

fn draw_with<R: Render>(
    program: &str,
    canvas_config: &CanvasConfig,
    settings: &RunSettings,
    code: &[u8],
    out: &Path,
) -> i32 {
    let mut canvas = match R::init(canvas_config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{program}: error initializing drawing system: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    let result = {
        let mut interp = Interpreter::new_with_stack_limit(&mut canvas, settings.max_stack);
        interp.set_scale(settings.scale);
        interp.set_debug(settings.debug);
        interp.run(code)
    };

    let mut exit_code = 0;
    if let Err(err) = &result {
        // Everything drawn before the error is still written out below.
        print_draw_error(Some(program), code, err);
        exit_code = 1;
    }

    if let Err(e) = canvas.finish(out) {
        eprintln!("{program}: error writing image ({}): {e}", out.display());
        let _ = io::stderr().flush();
        exit_code = 1;
    }
    let _ = io::stdout().flush();
    exit_code
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} --out FILE [OPTIONS] "<program>"    # Draw instructions given as arguments (concatenated)
  {0} --out FILE [OPTIONS] --in PATH      # Draw instructions read from PATH
  {0} --out FILE [OPTIONS] < PATH         # Draw instructions read from STDIN

Options:
  --out,        -o FILE      Output image, *.png or *.svg (required)
  --in,         -i PATH      Read instructions from PATH
  --width,      -w N         Width of image canvas (default: 800)
  --height,     -H N         Height of image canvas (default: 600)
  --origin-x,   -x X         X of starting point (default: width/2)
  --origin-y,   -y Y         Y of starting point (default: height/2)
  --scale,      -s S>0       Scale drawing lines (default: 1.0)
  --line-width, -l W>0       Width of line stroke (default: 2.0)
  --line-cap,   -c CAP       normal|round|square (default: normal)
  --line-join,  -j JOIN      miter|round|bevel (default: miter)
  --format      FORMAT       png|svg (default: from --out extension)
  --max-stack   N            Maximum saved states (default: 16777216)
  --debug,      -d           Print a step-by-step table of executed commands
  --help,       -h           Show this help

Supported characters:
  d : Move forward drawing a line
  u : Move forward without drawing
  < : Turn 15 degrees counterclockwise
  > : Turn 15 degrees clockwise
  [ : Push state (position and direction) onto the stack
  ] : Pop state (position and direction) from the stack
  o : Move to origin without drawing
  r : Move to origin without drawing and reset angle to 0 degrees
  # : Execute the next instruction # times (# is a single digit)

Notes:
- Digits multiply: 2d = dd, 3d = ddd, 23d = 6d.
- Any other character is ignored.
- Stack usage must be balanced; popping an empty stack stops the drawing
  and the image is written with what was drawn so far.
- Defaults can be set in a [canvas] table of ~/.config/letdraw.toml
  (or the file named by LETDRAW_CONFIG).
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
