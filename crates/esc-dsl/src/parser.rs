//! Grammar for level definition files.
//!
//! ```text
//! <count-line>   digits only; the number of rooms N
//! ROOM           <name> <description> <objects-line> <object-block>*
//! <objects-line> a line starting with OBJECTS; its first digit run is M
//! OBJECT         <name> <description> <puzzle-type> <prompt> <answer> <gives-item> <item-name>
//! ```
//!
//! Every field is the next non-blank line after its marker. Keywords are
//! matched without regard to case. When input runs out before a field is
//! read, the field's default is used and a warning is recorded.

use esc_core::text::lenient_int;
use esc_core::{GameObject, Level, PuzzleFacet, PuzzleKind, RoomHeader};

use crate::cursor::{Line, LineCursor};
use crate::diagnostics::Diagnostic;
use crate::error::ParseError;

const DEFAULT_ROOM_NAME: &str = "Unnamed Room";
const DEFAULT_OBJECT_NAME: &str = "Unnamed Object";
const DEFAULT_DESCRIPTION: &str = " ";

/// Upper bound on the empty rooms added when the file holds fewer ROOM
/// blocks than its count line declares.
pub const MAX_PADDED_ROOMS: usize = 1000;

const NO_PROMPT: &str = "NOPROMPT";
const NO_ANSWER: &str = "NOANSWER";
const NO_ITEM: &str = "NOITEM";

/// A parsed level together with the warnings raised while reading it.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// The assembled level.
    pub level: Level,
    /// Every default substitution or skipped line, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse level source text.
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    LevelParser::new(source).run()
}

struct LevelParser<'a> {
    cursor: LineCursor<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LevelParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            cursor: LineCursor::new(source),
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Parsed, ParseError> {
        let room_count = self.room_count()?;

        let mut headers: Vec<RoomHeader> = Vec::new();
        let mut placed: Vec<(usize, GameObject)> = Vec::new();

        while let Some(line) = self.cursor.next_line() {
            if !line.is_keyword("ROOM") {
                self.warn(&line, format!("skipped unrecognized line \"{}\"", line.text));
                continue;
            }
            if headers.len() >= room_count {
                self.diagnostics.push(
                    Diagnostic::warning(
                        line.span(),
                        format!("room block beyond the declared count of {room_count}; the rest of the file is ignored"),
                    )
                    .with_label("parsing stops here"),
                );
                break;
            }

            let room = headers.len();
            let (header, declared) = self.room_block();
            headers.push(header);

            let mut found = 0;
            while found < declared {
                match self.object_block() {
                    Some(object) => {
                        placed.push((room, object));
                        found += 1;
                    }
                    None => break,
                }
            }
            if found < declared {
                self.diagnostics.push(Diagnostic::warning(
                    self.cursor.end_span(),
                    format!(
                        "room \"{}\" declares {declared} objects but only {found} were found",
                        headers[room].name
                    ),
                ));
            }
        }

        if headers.len() < room_count {
            self.diagnostics.push(Diagnostic::warning(
                self.cursor.end_span(),
                format!(
                    "expected {room_count} rooms but found {}; the rest are left empty",
                    headers.len()
                ),
            ));
            let padded = room_count.min(headers.len() + MAX_PADDED_ROOMS);
            if padded < room_count {
                self.diagnostics.push(Diagnostic::warning(
                    self.cursor.end_span(),
                    format!("at most {MAX_PADDED_ROOMS} empty rooms are added; the level ends after room {padded}"),
                ));
            }
            headers.resize_with(padded, || {
                RoomHeader::new(DEFAULT_ROOM_NAME, DEFAULT_DESCRIPTION)
            });
        }

        let level = Level::assemble(headers, placed);
        log::debug!(
            "parsed level: {} rooms, {} objects, {} warnings",
            level.room_count(),
            level.object_count(),
            self.diagnostics.len()
        );

        Ok(Parsed {
            level,
            diagnostics: self.diagnostics,
        })
    }

    // -----------------------------------------------------------------------
    // Count line
    // -----------------------------------------------------------------------

    fn room_count(&mut self) -> Result<usize, ParseError> {
        while let Some(line) = self.cursor.next_line() {
            if !line.text.bytes().all(|b| b.is_ascii_digit()) {
                self.warn(&line, "skipped line before the room count");
                continue;
            }
            return match line.text.parse::<u32>() {
                Ok(n) if n > 0 => Ok(n as usize),
                _ => Err(ParseError::MissingOrInvalidRoomCount),
            };
        }
        Err(ParseError::MissingOrInvalidRoomCount)
    }

    // -----------------------------------------------------------------------
    // Room block
    // -----------------------------------------------------------------------

    /// Read a room's name, description and declared object count. The ROOM
    /// marker has already been consumed.
    fn room_block(&mut self) -> (RoomHeader, usize) {
        let name = self
            .field("room name")
            .unwrap_or(DEFAULT_ROOM_NAME)
            .to_string();
        let description = self
            .field("room description")
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string();
        let declared = self.objects_line(&name);
        (RoomHeader { name, description }, declared)
    }

    /// Scan forward to the room's OBJECTS line, skipping anything else on
    /// the way, ROOM lines included. A bare OBJECT line ends the search with
    /// no objects.
    fn objects_line(&mut self, room_name: &str) -> usize {
        while let Some(line) = self.cursor.next_line() {
            if line.starts_with_keyword("OBJECTS") {
                return match first_digit_run(line.text) {
                    Some(digits) => digits.parse::<usize>().unwrap_or(usize::MAX),
                    None => {
                        self.warn(
                            &line,
                            format!("OBJECTS line of room \"{room_name}\" has no count; it holds no objects"),
                        );
                        0
                    }
                };
            }
            if line.is_keyword("OBJECT") {
                self.warn(
                    &line,
                    format!("OBJECT before the OBJECTS line in room \"{room_name}\"; it holds no objects"),
                );
                return 0;
            }
            self.skip(&line, "the OBJECTS line");
        }

        self.diagnostics.push(Diagnostic::warning(
            self.cursor.end_span(),
            format!("room \"{room_name}\" has no OBJECTS line; it holds no objects"),
        ));
        0
    }

    // -----------------------------------------------------------------------
    // Object block
    // -----------------------------------------------------------------------

    /// Seek the next OBJECT marker, across ROOM lines if need be, and read
    /// the block after it. Returns `None` at the end of input.
    fn object_block(&mut self) -> Option<GameObject> {
        loop {
            let line = self.cursor.next_line()?;
            if line.is_keyword("OBJECT") {
                break;
            }
            self.skip(&line, "an OBJECT marker");
        }

        let name = self
            .field("object name")
            .unwrap_or(DEFAULT_OBJECT_NAME)
            .to_string();
        let description = self
            .field("object description")
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string();
        let kind = self.puzzle_kind();
        let prompt = sentinel(self.field("puzzle prompt"), NO_PROMPT);
        let answer = sentinel(self.field("puzzle answer"), NO_ANSWER);
        let gives_item = self
            .field("gives-item flag")
            .is_some_and(|t| t == "1" || t.eq_ignore_ascii_case("YES"));
        let item_name = sentinel(self.field("item name"), NO_ITEM);

        Some(GameObject {
            name,
            description,
            facet: PuzzleFacet {
                kind,
                prompt,
                answer,
                gives_item,
                item_name,
            },
        })
    }

    fn puzzle_kind(&mut self) -> PuzzleKind {
        let Some(line) = self.cursor.next_line() else {
            self.missing("puzzle type");
            return PuzzleKind::None;
        };
        let code = lenient_int(line.text);
        if !(0..=2).contains(&code) {
            self.warn(
                &line,
                format!("unknown puzzle type {code}; treating it as a text puzzle"),
            );
        }
        PuzzleKind::from_code(code)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Next non-blank line as a field value, recording a warning at end of input.
    fn field(&mut self, what: &str) -> Option<&'a str> {
        match self.cursor.next_line() {
            Some(line) => Some(line.text),
            None => {
                self.missing(what);
                None
            }
        }
    }

    /// Warn about a line passed over while seeking `target`.
    fn skip(&mut self, line: &Line<'_>, target: &str) {
        let message = if line.is_keyword("ROOM") {
            format!("ROOM line skipped while looking for {target}; what follows joins the current room")
        } else {
            format!("skipped unrecognized line \"{}\"", line.text)
        };
        self.warn(line, message);
    }

    fn missing(&mut self, what: &str) {
        self.diagnostics.push(Diagnostic::warning(
            self.cursor.end_span(),
            format!("unexpected end of input: {what} left at its default"),
        ));
    }

    fn warn(&mut self, line: &Line<'_>, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::warning(line.span(), message));
    }
}

/// Map an absent field or its sentinel to an empty string.
fn sentinel(value: Option<&str>, marker: &str) -> String {
    match value {
        Some(v) if !v.eq_ignore_ascii_case(marker) => v.to_string(),
        _ => String::new(),
    }
}

fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}
