use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use clap::ValueEnum;
use cross_xdg::BaseDirs;

use crate::canvas::{LineCap, LineJoin};
use crate::stack::DEFAULT_MAX_DEPTH;

/// Environment variable naming a config file to use instead of the XDG one.
pub const CONFIG_ENV: &str = "LETDRAW_CONFIG";

/// Settings used when the command line leaves them out.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub max_stack_depth: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scale: 1.0,
            line_width: 2.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            max_stack_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

static DEFAULTS: OnceLock<Defaults> = OnceLock::new();

pub fn defaults() -> &'static Defaults {
    DEFAULTS.get_or_init(|| {
        config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|content| parse(&content))
            .unwrap_or_default()
    })
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    // Linux: ~/.config/letdraw.toml; macOS and Windows use the same
    // ~/.config layout under cross-xdg.
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("letdraw.toml");
    Some(path)
}

/// Reads the `[canvas]` table of a small TOML file. Keys that are unknown or
/// fail to parse keep their built-in value.
pub fn parse(content: &str) -> Defaults {
    let mut in_canvas = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            in_canvas = line[1..line.len() - 1].trim() == "canvas";
            continue;
        }
        if !in_canvas { continue; }
        if let Some((key, val_raw)) = line.split_once('=') {
            let val_raw = val_raw.trim();
            // Accept quoted or unquoted
            let val = val_raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(val_raw);
            map.insert(key.trim().to_string(), val.to_string());
        }
    }

    let mut cfg = Defaults::default();

    macro_rules! set {
        ($field:ident, $parse:expr) => {
            if let Some(v) = map.get(stringify!($field)).and_then(|s| $parse(s.as_str())) {
                cfg.$field = v;
            }
        };
    }

    set!(width, |s: &str| s.parse::<u32>().ok().filter(|&v| v > 0));
    set!(height, |s: &str| s.parse::<u32>().ok().filter(|&v| v > 0));
    set!(scale, positive_f64);
    set!(line_width, positive_f64);
    set!(line_cap, |s: &str| LineCap::from_str(s, true).ok());
    set!(line_join, |s: &str| LineJoin::from_str(s, true).ok());
    set!(max_stack_depth, |s: &str| s.parse::<usize>().ok().filter(|&v| v > 0));

    cfg
}

fn positive_f64(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_builtin_defaults() {
        assert_eq!(parse(""), Defaults::default());
    }

    #[test]
    fn reads_canvas_table() {
        let cfg = parse(
            r#"
# drawing defaults
[canvas]
width = 320
height = 200
scale = 4.5
line_width = "0.5"
line_cap = "round"
line_join = bevel
max_stack_depth = 100
"#,
        );
        assert_eq!(cfg.width, 320);
        assert_eq!(cfg.height, 200);
        assert_eq!(cfg.scale, 4.5);
        assert_eq!(cfg.line_width, 0.5);
        assert_eq!(cfg.line_cap, LineCap::Round);
        assert_eq!(cfg.line_join, LineJoin::Bevel);
        assert_eq!(cfg.max_stack_depth, 100);
    }

    #[test]
    fn keys_outside_canvas_are_ignored() {
        let cfg = parse("[other]\nwidth = 10\n[canvas]\nheight = 10\n");
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.height, 10);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let cfg = parse("[canvas]\nwidth = -3\nscale = 0\nline_cap = wavy\n");
        assert_eq!(cfg, Defaults::default());
    }

    #[test]
    fn normal_cap_means_butt() {
        assert_eq!(parse("[canvas]\nline_cap = normal").line_cap, LineCap::Butt);
    }
}
