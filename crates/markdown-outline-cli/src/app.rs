use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use markdown_outline_config::Config;
use markdown_outline_engine::editing::Motion;
use markdown_outline_engine::{Document, DocumentOptions, Key, Keymap};
use std::path::{Path, PathBuf};

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

pub struct App {
    pub path: PathBuf,
    pub document: Document,
    keymap: Keymap,
    pub status: String,
    /// First document line shown in the editor pane.
    pub scroll: usize,
    /// Version of the document when it was last loaded or saved.
    saved_version: u64,
    quit_armed: bool,
}

pub fn document_options(config: &Config) -> DocumentOptions {
    DocumentOptions {
        tab_size: config.tab_size,
        indent_with_tabs: config.indent_with_tabs,
        disable_input: config.disable_input,
        ..DocumentOptions::default()
    }
}

impl App {
    /// Opens `path`, or starts an empty buffer that will be written there.
    pub fn open(path: &Path, config: &Config) -> Result<Self> {
        let bytes = if path.exists() {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
        } else {
            Vec::new()
        };
        let document = Document::from_bytes(&bytes)?.with_options(document_options(config));
        Ok(Self::new(path.to_path_buf(), document))
    }

    pub fn new(path: PathBuf, mut document: Document) -> Self {
        document.set_cursor(Default::default());
        let status = format!("Opened {}", path.display());
        Self {
            path,
            saved_version: document.version(),
            document,
            keymap: Keymap::default(),
            status,
            scroll: 0,
            quit_armed: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.document.version() != self.saved_version
    }

    pub fn save(&mut self) -> Result<()> {
        std::fs::write(&self.path, self.document.to_bytes())
            .with_context(|| format!("writing {}", self.path.display()))?;
        self.saved_version = self.document.version();
        self.status = format!("Saved {}", self.path.display());
        log::info!("saved {}", self.path.display());
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if !(ctrl && key.code == KeyCode::Char('q')) {
            self.quit_armed = false;
        }

        match key.code {
            KeyCode::Char('q') if ctrl => {
                if self.is_dirty() && !self.quit_armed {
                    self.quit_armed = true;
                    self.status = "Unsaved changes. Ctrl-Q again to quit".to_string();
                    return Ok(Action::Continue);
                }
                return Ok(Action::Quit);
            }
            KeyCode::Char('s') if ctrl => self.save()?,
            KeyCode::Enter => {
                self.keymap.handle(&mut self.document, Key::Enter)?;
            }
            KeyCode::Tab => {
                self.keymap.handle(&mut self.document, Key::Tab)?;
            }
            KeyCode::BackTab => {
                self.keymap.handle(&mut self.document, Key::ShiftTab)?;
            }
            KeyCode::Backspace => {
                self.document.delete_backward()?;
            }
            KeyCode::Left => self.document.move_cursor(Motion::Left),
            KeyCode::Right => self.document.move_cursor(Motion::Right),
            KeyCode::Up => self.document.move_cursor(Motion::Up),
            KeyCode::Down => self.document.move_cursor(Motion::Down),
            KeyCode::Home => self.document.move_cursor(Motion::LineStart),
            KeyCode::End => self.document.move_cursor(Motion::LineEnd),
            KeyCode::Char(c) if !ctrl => {
                self.document.insert_text(c.encode_utf8(&mut [0; 4]))?;
            }
            _ => {}
        }
        Ok(Action::Continue)
    }

    /// Keeps the primary cursor inside a pane `height` lines tall.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        let line = self.document.primary_cursor().line;
        if line < self.scroll {
            self.scroll = line;
        } else if height > 0 && line >= self.scroll + height {
            self.scroll = line + 1 - height;
        }
    }

    /// Cursor position relative to the top-left of the editor pane, with
    /// tabs expanded to the document's tab size.
    pub fn cursor_offset(&self) -> (usize, usize) {
        let cursor = self.document.primary_cursor();
        let text = self.document.line_text(cursor.line).unwrap_or_default();
        let tab = self.document.options().tab_size.max(1);
        let column = text
            .get(..cursor.column)
            .unwrap_or_default()
            .chars()
            .fold(0, |col, c| match c {
                '\t' => col + tab - col % tab,
                _ => col + 1,
            });
        (column, cursor.line.saturating_sub(self.scroll))
    }

    /// Document lines with tabs expanded for display.
    pub fn display_lines(&self) -> Vec<String> {
        let tab = self.document.options().tab_size.max(1);
        (0..self.document.line_count())
            .map(|i| {
                let text = self.document.line_text(i).unwrap_or_default();
                let mut out = String::with_capacity(text.len());
                for c in text.chars() {
                    if c == '\t' {
                        let pad = tab - out.chars().count() % tab;
                        out.push_str(&" ".repeat(pad));
                    } else {
                        out.push(c);
                    }
                }
                out
            })
            .collect()
    }
}
