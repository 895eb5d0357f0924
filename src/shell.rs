use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{error::LoadError, index::CourseIndex, loader::load_courses};

const MENU: &str = "Welcome to the course planner.\n\
                    Menu:\n  \
                    1. Load Data Structure.\n  \
                    2. Print Course List.\n  \
                    3. Print Course.\n  \
                    9. Exit\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Load,
    PrintAll,
    Search(String),
    Exit,
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything the menu needs between requests.
pub struct Session {
    index: CourseIndex,
    source: PathBuf,
    loaded: bool,
}

impl Session {
    pub fn new(source: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            index: CourseIndex::with_capacity(capacity),
            source: source.into(),
            loaded: false,
        }
    }

    pub fn index(&self) -> &CourseIndex {
        &self.index
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Loads the source file once. Later calls are no-ops, and a failed load leaves the
    /// index untouched.
    pub fn load(&mut self) -> Result<(), LoadError> {
        if self.loaded {
            debug!("{} already loaded", self.source.display());
            return Ok(());
        }
        let records = load_courses(&self.source)?;
        self.index.extend(records);
        self.loaded = true;
        info!(
            "indexed {} courses across {} slots",
            self.index.len(),
            self.index.capacity()
        );
        Ok(())
    }

    pub fn handle<W: Write>(&mut self, request: Request, out: &mut W) -> io::Result<Flow> {
        match request {
            Request::Load => match self.load() {
                Ok(()) => writeln!(out, "Courses loaded successfully.")?,
                Err(error) => {
                    warn!("load failed: {}", error);
                    writeln!(out, "Error loading {}: {}", self.source.display(), error)?;
                }
            },
            Request::PrintAll => self.index.print_all(out)?,
            Request::Search(id) => match self.index.search(&id) {
                Some(course) => writeln!(out, "{}", course)?,
                None => writeln!(out, "Course ID {} not found.", id)?,
            },
            Request::Exit => {
                writeln!(out, "Thank you for using the course planner!")?;
                return Ok(Flow::Exit);
            }
            Request::Invalid(choice) => writeln!(out, "{} is not a valid option.", choice)?,
        }
        Ok(Flow::Continue)
    }
}

/// Whitespace-separated words read across line boundaries.
struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
    }
}

/// Menu loop. Returns on the exit choice or at end of input.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> io::Result<()> {
    let mut tokens = Tokens::new(input);
    loop {
        write!(out, "{}What would you like to do? ", MENU)?;
        out.flush()?;
        let Some(choice) = tokens.next_token()? else {
            return Ok(());
        };
        let request = match choice.parse::<i64>() {
            Ok(1) => Request::Load,
            Ok(2) => Request::PrintAll,
            Ok(3) => {
                write!(out, "What course do you want to know about? ")?;
                out.flush()?;
                match tokens.next_token()? {
                    Some(id) => Request::Search(id),
                    None => return Ok(()),
                }
            }
            Ok(9) => Request::Exit,
            _ => Request::Invalid(choice),
        };
        if session.handle(request, out)? == Flow::Exit {
            return Ok(());
        }
    }
}
