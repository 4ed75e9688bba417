//! # Editing Sessions
//!
//! A line-oriented command language that drives a mounted editor, so layouts
//! can be built from scripts or typed interactively.
//!
//! ```text
//! # comments and blank lines are skipped
//! generate
//! mode drag
//! drag seat-1718000000000-4 250 150 330 150
//! key ctrl+z
//! add-amenity water-cooler
//! save
//! ```
//!
//! After each command the editor's notifications are written to the output,
//! one per line. Editor failures (unknown template, bad import) are reported
//! that way and the session carries on; a command that cannot be parsed
//! stops the session with its line number.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::editor::{EditorMode, LayoutEditor, MountedEditor};
use crate::error::{Result, SeatplanError};
use crate::layout::{ElementAttributes, KindFilter, LayoutElement, Point, Size, Zone};
use crate::shortcuts::{KeyCombo, ShortcutRegistry};
use crate::storage::LayoutStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomCommand {
    In,
    Out,
    Reset,
}

/// One session command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddSeat { x: i32, y: i32 },
    AddArea(String),
    AddAmenity(String),
    Click(Point),
    Mode(EditorMode),
    Select(Option<String>),
    Drag { id: String, from: Point, to: Point },
    Copy,
    Paste,
    Delete,
    Undo,
    Redo,
    Key(KeyCombo),
    Generate,
    Clear { confirmed: bool },
    Save,
    Load,
    Import(PathBuf),
    Export(Option<PathBuf>),
    Filter(KindFilter),
    Search(String),
    List,
    Stats,
    Zoom(ZoomCommand),
    Name(String),
    Resize { id: String, size: Size },
    SetZone { id: String, zone: Zone },
}

fn arg<'a>(args: &[&'a str], i: usize, what: &str) -> std::result::Result<&'a str, String> {
    args.get(i)
        .copied()
        .ok_or_else(|| format!("missing {}", what))
}

fn num<T: FromStr>(args: &[&str], i: usize, what: &str) -> std::result::Result<T, String> {
    let raw = arg(args, i, what)?;
    raw.parse()
        .map_err(|_| format!("{} must be a number, got '{}'", what, raw))
}

fn no_more(args: &[&str], n: usize) -> std::result::Result<(), String> {
    if args.len() > n {
        Err(format!("unexpected argument '{}'", args[n]))
    } else {
        Ok(())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or("empty command")?;
        let args: Vec<&str> = words.collect();
        let rest = || args.join(" ");

        let command = match name.to_lowercase().as_str() {
            "add-seat" => {
                no_more(&args, 2)?;
                Command::AddSeat {
                    x: num(&args, 0, "x")?,
                    y: num(&args, 1, "y")?,
                }
            }
            "add-area" => {
                no_more(&args, 1)?;
                Command::AddArea(arg(&args, 0, "area type")?.to_string())
            }
            "add-amenity" => {
                no_more(&args, 1)?;
                Command::AddAmenity(arg(&args, 0, "amenity type")?.to_string())
            }
            "click" => {
                no_more(&args, 2)?;
                Command::Click(Point::new(num(&args, 0, "x")?, num(&args, 1, "y")?))
            }
            "mode" => {
                no_more(&args, 1)?;
                match arg(&args, 0, "mode")?.to_lowercase().as_str() {
                    "add" => Command::Mode(EditorMode::Add),
                    "drag" => Command::Mode(EditorMode::Drag),
                    other => return Err(format!("unknown mode '{}' (add or drag)", other)),
                }
            }
            "select" => {
                no_more(&args, 1)?;
                match arg(&args, 0, "element id")? {
                    "none" => Command::Select(None),
                    id => Command::Select(Some(id.to_string())),
                }
            }
            "drag" => {
                no_more(&args, 5)?;
                Command::Drag {
                    id: arg(&args, 0, "element id")?.to_string(),
                    from: Point::new(num(&args, 1, "from x")?, num(&args, 2, "from y")?),
                    to: Point::new(num(&args, 3, "to x")?, num(&args, 4, "to y")?),
                }
            }
            "copy" => Command::Copy,
            "paste" => Command::Paste,
            "delete" => Command::Delete,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "key" => {
                no_more(&args, 1)?;
                Command::Key(arg(&args, 0, "key")?.parse()?)
            }
            "generate" => Command::Generate,
            "clear" => {
                no_more(&args, 1)?;
                Command::Clear {
                    confirmed: args.first().is_some_and(|a| a.eq_ignore_ascii_case("yes")),
                }
            }
            "save" => Command::Save,
            "load" => Command::Load,
            "import" => Command::Import(PathBuf::from(arg(&args, 0, "file")?)),
            "export" => Command::Export(args.first().map(PathBuf::from)),
            "filter" => {
                no_more(&args, 1)?;
                Command::Filter(arg(&args, 0, "kind")?.parse()?)
            }
            "search" => Command::Search(rest()),
            "list" => Command::List,
            "stats" => Command::Stats,
            "zoom" => {
                no_more(&args, 1)?;
                match arg(&args, 0, "direction")?.to_lowercase().as_str() {
                    "in" => Command::Zoom(ZoomCommand::In),
                    "out" => Command::Zoom(ZoomCommand::Out),
                    "reset" => Command::Zoom(ZoomCommand::Reset),
                    other => return Err(format!("unknown zoom '{}' (in, out or reset)", other)),
                }
            }
            "name" => {
                let name = rest();
                if name.is_empty() {
                    return Err("missing layout name".to_string());
                }
                Command::Name(name)
            }
            "resize" => {
                no_more(&args, 3)?;
                Command::Resize {
                    id: arg(&args, 0, "element id")?.to_string(),
                    size: Size::new(num(&args, 1, "width")?, num(&args, 2, "height")?),
                }
            }
            "zone" => {
                no_more(&args, 2)?;
                Command::SetZone {
                    id: arg(&args, 0, "element id")?.to_string(),
                    zone: arg(&args, 1, "zone")?.parse()?,
                }
            }
            other => return Err(format!("unknown command '{}'", other)),
        };

        // Bare commands take no arguments.
        if matches!(
            command,
            Command::Copy
                | Command::Paste
                | Command::Delete
                | Command::Undo
                | Command::Redo
                | Command::Generate
                | Command::Save
                | Command::Load
                | Command::List
                | Command::Stats
        ) {
            no_more(&args, 0)?;
        }

        Ok(command)
    }
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

/// A mounted editor plus the collaborators commands need.
pub struct Session<W: Write> {
    editor: MountedEditor,
    store: Box<dyn LayoutStore>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(
        editor: LayoutEditor,
        registry: &ShortcutRegistry,
        store: Box<dyn LayoutStore>,
        out: W,
    ) -> Self {
        Self {
            editor: MountedEditor::mount(editor, registry),
            store,
            out,
        }
    }

    pub fn editor(&self) -> &LayoutEditor {
        self.editor.editor()
    }

    /// End the session, releasing its shortcuts.
    pub fn finish(self) -> (LayoutEditor, W) {
        (self.editor.unmount(), self.out)
    }

    /// Run every line of `script`. Returns the number of commands executed.
    pub fn run_script<R: BufRead>(&mut self, script: R) -> Result<usize> {
        let mut executed = 0;
        for (i, line) in script.lines().enumerate() {
            let line = line?;
            let command = parse_line(&line)
                .map_err(|e| SeatplanError::Command(format!("line {}: {}", i + 1, e)))?;
            if let Some(command) = command {
                self.execute(command)?;
                executed += 1;
            }
        }
        Ok(executed)
    }

    /// Run one command and write out the notifications it produced.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        tracing::debug!(?command, "execute");
        self.dispatch(command)?;
        for note in self.editor.editor_mut().take_notifications() {
            writeln!(self.out, "{}", note)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<()> {
        let editor = self.editor.editor_mut();
        match command {
            Command::AddSeat { x, y } => {
                editor.add_seat(x, y);
            }
            // Failures are already queued as notifications.
            Command::AddArea(key) => {
                let _ = editor.add_area(&key);
            }
            Command::AddAmenity(key) => {
                let _ = editor.add_amenity(&key);
            }
            Command::Click(point) => {
                editor.click_canvas(point);
            }
            Command::Mode(mode) => editor.set_mode(mode),
            Command::Select(id) => {
                editor.select(id.as_deref());
            }
            Command::Drag { id, from, to } => {
                if editor.begin_drag(&id, from) {
                    editor.update_drag(to);
                    editor.end_drag();
                } else {
                    writeln!(self.out, "drag ignored: not in drag mode or no element '{}'", id)?;
                }
            }
            Command::Copy => {
                editor.copy();
            }
            Command::Paste => {
                editor.paste();
            }
            Command::Delete => {
                editor.delete_selected();
            }
            Command::Undo => {
                editor.undo();
            }
            Command::Redo => {
                editor.redo();
            }
            Command::Key(combo) => {
                self.editor.handle_key(&combo);
            }
            Command::Generate => editor.generate_smart_layout(),
            Command::Clear { confirmed } => {
                let mut asked = None;
                editor.clear_canvas(|prompt| {
                    asked = Some(prompt.to_string());
                    confirmed
                });
                if let Some(prompt) = asked {
                    let answer = if confirmed { "yes" } else { "no" };
                    writeln!(self.out, "{} {}", prompt, answer)?;
                }
            }
            Command::Save => {
                let _ = editor.save_layout(self.store.as_mut());
            }
            Command::Load => {
                let _ = editor.load_layout(self.store.as_ref());
            }
            Command::Import(path) => {
                let contents = read_file(&path)?;
                let _ = editor.import_layout(&contents);
            }
            Command::Export(path) => {
                if let Ok(exported) = editor.export_layout() {
                    let path = path.unwrap_or_else(|| PathBuf::from(&exported.file_name));
                    fs::write(&path, exported.contents)?;
                    writeln!(self.out, "wrote {}", path.display())?;
                }
            }
            Command::Filter(filter) => editor.set_kind_filter(filter),
            Command::Search(text) => editor.set_search(&text),
            Command::List => {
                let lines: Vec<String> = editor.visible().into_iter().map(describe).collect();
                for line in lines {
                    writeln!(self.out, "{}", line)?;
                }
            }
            Command::Stats => {
                let stats = editor.stats();
                writeln!(
                    self.out,
                    "seats: {}  areas: {}  amenities: {}",
                    stats.total_seats, stats.areas, stats.amenities
                )?;
                for (zone, count) in &stats.seats_by_zone {
                    writeln!(self.out, "  {}: {}", zone, count)?;
                }
            }
            Command::Zoom(zoom) => {
                let percent = match zoom {
                    ZoomCommand::In => editor.zoom_in(),
                    ZoomCommand::Out => editor.zoom_out(),
                    ZoomCommand::Reset => editor.reset_zoom(),
                };
                writeln!(self.out, "zoom {}%", percent)?;
            }
            Command::Name(name) => {
                editor.set_name(&name);
            }
            Command::Resize { id, size } => {
                let _ = editor.resize_area(&id, size);
            }
            Command::SetZone { id, zone } => {
                let _ = editor.set_seat_zone(&id, zone);
            }
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        SeatplanError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// One-line listing of an element.
pub fn describe(element: &LayoutElement) -> String {
    let extra = match &element.attributes {
        ElementAttributes::Seat(seat) => format!("zone={}", seat.zone),
        ElementAttributes::Area(area) => format!("type={}", area.area_type),
        ElementAttributes::Amenity(amenity) => format!("type={}", amenity.amenity_type),
    };
    format!(
        "{:<28} {:<8} {:<18} ({}, {}) {}x{} {}",
        element.id,
        element.kind().as_str(),
        element.label(),
        element.position.x,
        element.position.y,
        element.size.width,
        element.size.height,
        extra
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::editor::IdGenerator;
    use crate::layout::ElementKind;
    use crate::storage::MemoryStore;

    fn session() -> Session<Vec<u8>> {
        let editor =
            LayoutEditor::with_ids(EditorConfig::default(), IdGenerator::with_fixed_time(7)).unwrap();
        Session::new(
            editor,
            &ShortcutRegistry::new(),
            Box::new(MemoryStore::new()),
            Vec::new(),
        )
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.finish().1).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "add-seat 100 120".parse::<Command>().unwrap(),
            Command::AddSeat { x: 100, y: 120 }
        );
        assert_eq!(
            "mode DRAG".parse::<Command>().unwrap(),
            Command::Mode(EditorMode::Drag)
        );
        assert_eq!(
            "filter seat".parse::<Command>().unwrap(),
            Command::Filter(KindFilter::Only(ElementKind::Seat))
        );
        assert_eq!(
            "search Lunch Area".parse::<Command>().unwrap(),
            Command::Search("Lunch Area".into())
        );
        assert_eq!(
            "key ctrl+shift+z".parse::<Command>().unwrap(),
            Command::Key(KeyCombo::ctrl_shift('z'))
        );
        assert_eq!(
            "clear yes".parse::<Command>().unwrap(),
            Command::Clear { confirmed: true }
        );
        assert_eq!(
            "zone seat-1 exam-prep".parse::<Command>().unwrap(),
            Command::SetZone {
                id: "seat-1".into(),
                zone: Zone::ExamPrep
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("add-seat 100".parse::<Command>().unwrap_err().contains("missing y"));
        assert!("add-seat a 1".parse::<Command>().unwrap_err().contains("number"));
        assert!("undo now".parse::<Command>().unwrap_err().contains("unexpected"));
        assert!("teleport".parse::<Command>().unwrap_err().contains("unknown command"));
        assert!("zoom sideways".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_line_skips_comments() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# a comment").unwrap(), None);
        assert_eq!(parse_line(" undo ").unwrap(), Some(Command::Undo));
    }

    #[test]
    fn test_script_runs_and_reports() {
        let mut s = session();
        let script = "add-seat 100 100\nadd-area ballroom\nadd-amenity coffee\nundo\n";
        assert_eq!(s.run_script(script.as_bytes()).unwrap(), 4);
        assert_eq!(s.editor().elements().len(), 1);
        let out = output(s);
        assert!(out.contains("[success] Added seat S1"));
        assert!(out.contains("[error] Unknown area template 'ballroom'"));
        assert!(out.contains("[info] Undo: Add amenity"));
    }

    #[test]
    fn test_script_stops_on_bad_line() {
        let mut s = session();
        let err = s.run_script("add-seat 0 0\nfly away\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert_eq!(s.editor().elements().len(), 1);
    }

    #[test]
    fn test_drag_and_keys() {
        let mut s = session();
        s.run_script("add-seat 100 100\nmode drag\n".as_bytes()).unwrap();
        let id = s.editor().elements()[0].id.clone();
        let script = format!("drag {} 110 110 251 109\nkey ctrl+z\n", id);
        s.run_script(script.as_bytes()).unwrap();
        assert_eq!(s.editor().elements()[0].position.x, 100);
        s.run_script("key ctrl+y\n".as_bytes()).unwrap();
        assert_eq!(s.editor().elements()[0].position.x, 240);
    }

    #[test]
    fn test_clear_prompt_and_save_load() {
        let mut s = session();
        let script = "add-seat 0 0\nsave\nclear no\nclear yes\nload\nstats\n";
        s.run_script(script.as_bytes()).unwrap();
        assert_eq!(s.editor().elements().len(), 1);
        let out = output(s);
        assert!(out.contains("Clear all 1 elements? Only Undo can bring them back. no"));
        assert!(out.contains("[success] Canvas cleared"));
        assert!(out.contains("[success] Loaded 1 elements"));
        assert!(out.contains("seats: 1  areas: 0  amenities: 0"));
        assert!(out.contains("  reading: 1"));
    }

    #[test]
    fn test_set_zone_on_non_seat_reports_and_continues() {
        let mut s = session();
        s.run_script("add-area entrance\n".as_bytes()).unwrap();
        let id = s.editor().elements()[0].id.clone();
        let script = format!("zone {} silent\nadd-seat 0 0\n", id);
        assert_eq!(s.run_script(script.as_bytes()).unwrap(), 2);
        assert_eq!(s.editor().elements().len(), 2);
        let out = output(s);
        assert!(out.contains(&format!("[error] Element '{}' is not a seat", id)));
        assert!(out.contains("[success] Added seat S1"));
    }

    #[test]
    fn test_list_respects_filter() {
        let mut s = session();
        s.run_script("add-seat 0 0\nadd-area lunch\nfilter area\nlist\n".as_bytes())
            .unwrap();
        let out = output(s);
        assert!(out.contains("Lunch Area"));
        assert!(out.contains("type=lunch"));
        assert!(!out.contains("zone=reading"));
    }
}
