use remora::geom::screen_point;
use remora::{INPUT_SIDE, MappingEditor, OUTPUT_SIDE};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Editor(remora::Error),
    HiddenNode { side: String, path: String },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Editor(err) => write!(f, "{err}"),
            CliError::HiddenNode { side, path } => {
                write!(f, "node is not visible on side {side}: {path}")
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<remora::Error> for CliError {
    fn from(value: remora::Error) -> Self {
        Self::Editor(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Map,
}

#[derive(Debug, Clone)]
struct SidePath {
    side: String,
    path: String,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    output: Option<String>,
    width: f64,
    height: f64,
    pretty: bool,
    toggles: Vec<SidePath>,
    links: Vec<(SidePath, SidePath)>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "remora-cli\n\
\n\
USAGE:\n\
  remora-cli [render] [--width <w>] [--height <h>] [--toggle <side:path>]... [--link <from=to>]... [--out <path>] <input.json> <output.json>\n\
  remora-cli map [--pretty] [--width <w>] [--height <h>] [--toggle <side:path>]... [--link <from=to>]... [--out <path>] <input.json> <output.json>\n\
\n\
NOTES:\n\
  - '-' reads that record from stdin (at most one of the two).\n\
  - --toggle collapses (or re-expands) a subtree before any links are replayed, e.g. --toggle input:/b.\n\
  - --link replays a drag between two node markers. Paths default to the input side\n\
    on the left of '=' and the output side on the right; prefix with 'input:' or\n\
    'output:' to override, e.g. --link /a=/p or --link output:/q=input:/b/c.\n\
  - render prints the scene as SVG; map prints the recorded mappings as JSON.\n\
"
}

fn parse_side_path(raw: &str, default_side: &str) -> Result<SidePath, CliError> {
    let (side, path) = match raw.split_once(':') {
        Some((side @ (INPUT_SIDE | OUTPUT_SIDE), path)) => (side, path),
        Some(_) => return Err(CliError::Usage(usage())),
        None => (default_side, raw),
    };
    if !path.starts_with('/') {
        return Err(CliError::Usage(usage()));
    }
    Ok(SidePath {
        side: side.to_string(),
        path: path.to_string(),
    })
}

fn parse_link(raw: &str) -> Result<(SidePath, SidePath), CliError> {
    let Some((from, to)) = raw.split_once('=') else {
        return Err(CliError::Usage(usage()));
    };
    Ok((
        parse_side_path(from, INPUT_SIDE)?,
        parse_side_path(to, OUTPUT_SIDE)?,
    ))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        width: 960.0,
        height: 600.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "map" => args.command = Command::Map,
            "--pretty" => args.pretty = true,
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--toggle" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.toggles.push(parse_side_path(raw, INPUT_SIDE)?);
            }
            "--link" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.links.push(parse_link(raw)?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_none() {
                    args.input = Some(path.to_string());
                } else if args.output.is_none() {
                    args.output = Some(path.to_string());
                } else {
                    return Err(CliError::Usage(usage()));
                }
            }
        }
    }

    if args.input.is_none() || args.output.is_none() {
        return Err(CliError::Usage(usage()));
    }
    if args.input.as_deref() == Some("-") && args.output.as_deref() == Some("-") {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_record(path: &str) -> Result<Value, CliError> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    write_text(&text, out)
}

fn replay_link(editor: &mut MappingEditor, from: &SidePath, to: &SidePath) -> Result<(), CliError> {
    let hidden = |sp: &SidePath| CliError::HiddenNode {
        side: sp.side.clone(),
        path: sp.path.clone(),
    };
    let anchor = editor
        .marker_center(&from.side, &from.path)
        .ok_or_else(|| hidden(from))?;
    let release = editor
        .marker_center(&to.side, &to.path)
        .ok_or_else(|| hidden(to))?;

    editor.begin_drag(&from.side, &from.path, screen_point(anchor.x, anchor.y))?;
    editor.drag_by(release.x - anchor.x, release.y - anchor.y);
    editor.end_drag(screen_point(release.x, release.y))?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let input = read_record(args.input.as_deref().unwrap_or("-"))?;
    let output = read_record(args.output.as_deref().unwrap_or("-"))?;

    let mut editor = MappingEditor::new(&input, &output, args.width, args.height);
    for toggle in &args.toggles {
        editor.toggle(&toggle.side, &toggle.path)?;
    }
    for (from, to) in &args.links {
        replay_link(&mut editor, from, to)?;
    }

    match args.command {
        Command::Render => write_text(&editor.svg(), args.out.as_deref()),
        Command::Map => write_json(&editor.mappings(), args.pretty, args.out.as_deref()),
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
