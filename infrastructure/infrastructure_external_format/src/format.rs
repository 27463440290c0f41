//! Format Module
//!
//! Compiles an encode format string into a flat sequence of directives.
//!
//! | Text | Directive |
//! |---|---|
//! | `~a` `~s` `~b` `~i` `~l` `~u` `~f` `~d` `~p` `~P` | [`Directive::Scalar`] |
//! | `[` / `]` | [`Directive::ListOpen`] / [`Directive::Close`] |
//! | `{` / `}` | [`Directive::TupleOpen`] / [`Directive::Close`] |
//! | `[]` (adjacent) | [`Directive::EmptyList`] |
//! | `,` ` ` bare `~` | separators, no directive |
//!
//! Spaces may appear between `~` and its letter. Brackets are checked for
//! balance at compile time, so the interpreter never sees a stray close.

use thiserror::Error;

/// Scalar directive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `~a`
    Atom,
    /// `~s`
    Str,
    /// `~b`
    Binary,
    /// `~i`, `~l`, `~u`
    Integer,
    /// `~f`, `~d`
    Float,
    /// `~p`: the local pid of a link
    SelfPid,
    /// `~P`: a remote pid
    RemotePid,
}

impl ScalarKind {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'a' => Some(ScalarKind::Atom),
            's' => Some(ScalarKind::Str),
            'b' => Some(ScalarKind::Binary),
            'i' | 'l' | 'u' => Some(ScalarKind::Integer),
            'f' | 'd' => Some(ScalarKind::Float),
            'p' => Some(ScalarKind::SelfPid),
            'P' => Some(ScalarKind::RemotePid),
            _ => None,
        }
    }

    /// Directive text, for diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Atom => "~a",
            ScalarKind::Str => "~s",
            ScalarKind::Binary => "~b",
            ScalarKind::Integer => "~i",
            ScalarKind::Float => "~f",
            ScalarKind::SelfPid => "~p",
            ScalarKind::RemotePid => "~P",
        }
    }
}

/// Bracket kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    List,
    Tuple,
}

/// One compiled directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Scalar(ScalarKind),
    ListOpen,
    TupleOpen,
    Close(Bracket),
    /// Literal `[]`: writes nil and consumes a value slot without reading it
    EmptyList,
}

/// A directive and the byte offset it was compiled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub directive: Directive,
    pub position: usize,
}

/// Format compilation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Character that is neither a directive nor a separator
    #[error("bad directive {found:?} at position {position}")]
    BadDirective { position: usize, found: char },
    /// Close without open, mismatched close, or open without close
    #[error("unbalanced format at position {position}")]
    Unbalanced { position: usize },
}

/// A compiled format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    instructions: Vec<Instruction>,
}

impl Format {
    /// Compile a format string
    ///
    /// # Arguments
    /// * `text` - Format string such as `"{~a,[~i,~i]}"`
    ///
    /// # Returns
    /// * `Ok(Format)` - Compiled, bracket-balanced directive sequence
    /// * `Err(FormatError)` - Unknown directive or unbalanced brackets
    pub fn compile(text: &str) -> Result<Self, FormatError> {
        let mut instructions = Vec::new();
        let mut open: Vec<(Bracket, usize)> = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            let directive = match c {
                ' ' | ',' => continue,
                '~' => {
                    while chars.next_if(|&(_, c)| c == ' ').is_some() {}
                    match chars.peek().copied() {
                        // Bare tilde
                        None | Some((_, ',')) | Some((_, '~')) => continue,
                        Some((letter_pos, letter)) => {
                            chars.next();
                            let kind = ScalarKind::from_letter(letter).ok_or(
                                FormatError::BadDirective {
                                    position: letter_pos,
                                    found: letter,
                                },
                            )?;
                            Directive::Scalar(kind)
                        }
                    }
                }
                '[' => {
                    if chars.next_if(|&(_, c)| c == ']').is_some() {
                        Directive::EmptyList
                    } else {
                        open.push((Bracket::List, position));
                        Directive::ListOpen
                    }
                }
                '{' => {
                    open.push((Bracket::Tuple, position));
                    Directive::TupleOpen
                }
                ']' | '}' => {
                    let bracket = if c == ']' { Bracket::List } else { Bracket::Tuple };
                    match open.pop() {
                        Some((expected, _)) if expected == bracket => Directive::Close(bracket),
                        _ => return Err(FormatError::Unbalanced { position }),
                    }
                }
                found => return Err(FormatError::BadDirective { position, found }),
            };
            instructions.push(Instruction {
                directive,
                position,
            });
        }

        if let Some((_, position)) = open.pop() {
            return Err(FormatError::Unbalanced { position });
        }
        Ok(Self { instructions })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Directives only, without positions
    pub fn directives(&self) -> impl Iterator<Item = Directive> + '_ {
        self.instructions.iter().map(|i| i.directive)
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl std::str::FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::compile(s)
    }
}
