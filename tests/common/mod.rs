#![allow(dead_code)]

use iphreeqc::{CaptureError, Engine, EngineIo, Stop, StreamKind};

/// Test engine driven by a tiny line language, one directive per line:
///
/// `OUT|LOG|SCREEN|DUMP text`, `ERROR text`, `WARN text`, `STOP text`,
/// `FATAL kind text`, `PUNCH name num|int|text value`, `ENDROW`,
/// `OPEN kind path`, `CLOSE kind`, `QUERY kind`.
///
/// `ABORT kind text` and `LOST path` return a stop straight from the engine
/// without routing anything first.
///
/// Database text accepts `COMPONENT name`, `ERROR text`, and `STOP text`.
#[derive(Debug, Default)]
pub struct ScriptEngine {
    pub components: Vec<String>,
    pub loaded: bool,
    pub unloads: usize,
    pub runs: usize,
    pub last_query: Option<bool>,
}

impl ScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for ScriptEngine {
    fn load_database(&mut self, database: &str, io: &mut EngineIo<'_>) -> Result<(), Stop> {
        for line in database.lines() {
            let (directive, rest) = split_directive(line);
            match directive {
                "COMPONENT" => self.components.push(rest.to_string()),
                "ERROR" => io.error(rest)?,
                "STOP" => return Err(io.fatal(rest)),
                _ => {}
            }
        }
        self.loaded = true;
        Ok(())
    }

    fn run(&mut self, input: &str, io: &mut EngineIo<'_>) -> Result<(), Stop> {
        self.runs += 1;
        for line in input.lines() {
            let (directive, rest) = split_directive(line);
            match directive {
                "OUT" => io.emit_fmt(StreamKind::Output, format_args!("{rest}\n"), false)?,
                "LOG" => io.emit_fmt(StreamKind::Log, format_args!("{rest}\n"), false)?,
                "SCREEN" => io.emit_fmt(StreamKind::Screen, format_args!("{rest}\n"), false)?,
                "DUMP" => io.emit_fmt(StreamKind::Dump, format_args!("{rest}\n"), false)?,
                "ERROR" => io.error(rest)?,
                "WARN" => io.warning(rest)?,
                "STOP" => return Err(io.fatal(rest)),
                "ABORT" => {
                    let (kind, text) = split_directive(rest);
                    return Err(Stop::fatal(stream(kind), text));
                }
                "LOST" => {
                    return Err(CaptureError::ReadInput {
                        path: rest.to_string(),
                        source: std::io::ErrorKind::NotFound.into(),
                    }
                    .into())
                }
                "FATAL" => {
                    let (kind, text) = split_directive(rest);
                    io.emit_fmt(stream(kind), format_args!("{text}\n"), true)?;
                }
                "PUNCH" => {
                    let mut parts = rest.splitn(3, ' ');
                    let name = parts.next().unwrap_or_default();
                    let kind = parts.next().unwrap_or_default();
                    let value = parts.next().unwrap_or_default();
                    match kind {
                        "num" => io.punch(name, value.parse::<f64>().expect("number"))?,
                        "int" => io.punch(name, value.parse::<i64>().expect("integer"))?,
                        _ => io.punch(name, value)?,
                    }
                }
                "ENDROW" => io.end_row()?,
                "OPEN" => {
                    let (kind, path) = split_directive(rest);
                    io.open_sink(stream(kind), path)?;
                }
                "CLOSE" => io.close_sink(stream(rest))?,
                "QUERY" => self.last_query = Some(io.is_open(stream(rest))?),
                _ => {}
            }
        }
        Ok(())
    }

    fn components(&self) -> Vec<String> {
        self.components.clone()
    }

    fn unload(&mut self) {
        self.components.clear();
        self.loaded = false;
        self.unloads += 1;
    }
}

fn split_directive(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(' ') {
        Some((directive, rest)) => (directive, rest),
        None => (line, ""),
    }
}

fn stream(raw: &str) -> StreamKind {
    StreamKind::parse(raw).expect("stream kind")
}

pub const DATABASE: &str = "COMPONENT Ca\nCOMPONENT Na\nCOMPONENT Cl\n";
