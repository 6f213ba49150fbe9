//! The problem model: constants, atoms, the initial/goal state, and
//! action schemas, plus the `.dat`-line parser that builds them.
//!
//! Grounding (substituting schema variables by constants) lives in the
//! sibling [`ground`] module; this module stops at the pre-grounding
//! representation.

pub mod ground;

use crate::misc::log::targets;
use crate::types::err;

/// A parsed, not-yet-grounded atom application: a predicate name plus
/// its argument tokens, in source order.
///
/// Before grounding, argument tokens may be variables (lowercase-initial)
/// or constants (anything else). After grounding every argument is a
/// constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomTerm {
    pub predicate: String,
    pub args: Vec<String>,
}

impl AtomTerm {
    /// The canonical, whitespace-separated textual form used as a
    /// Herbrand-base key: `at(a,b)` becomes `"at a b"`.
    pub fn canonical_name(&self) -> String {
        if self.args.is_empty() {
            self.predicate.clone()
        } else {
            format!("{} {}", self.predicate, self.args.join(" "))
        }
    }
}

/// An atom together with its polarity (`true` unless the source text had
/// a leading `-`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignedAtom {
    pub positive: bool,
    pub atom: AtomTerm,
}

impl SignedAtom {
    pub fn canonical_name(&self) -> String {
        self.atom.canonical_name()
    }
}

/// An action schema as read from an `A` line: a name, its own parameter
/// tokens, and lists of precondition/effect literals. Parameter tokens
/// and literal argument tokens may still contain variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSchema {
    pub name: String,
    pub params: Vec<String>,
    pub preconditions: Vec<SignedAtom>,
    pub effects: Vec<SignedAtom>,
}

impl ActionSchema {
    /// Every lowercase-initial token reachable from this schema: its own
    /// parameters, plus any variable appearing in a precondition or
    /// effect argument list that isn't already a parameter. Order is
    /// first-occurrence, scanning parameters, then preconditions, then
    /// effects — this fixes the grounder's substitution order and so is
    /// load-bearing for determinism.
    pub fn variables(&self) -> Vec<String> {
        let mut seen = Vec::new();
        let mut push_if_var = |tok: &str, seen: &mut Vec<String>| {
            if is_variable(tok) && !seen.iter().any(|v| v == tok) {
                seen.push(tok.to_string());
            }
        };
        for p in &self.params {
            push_if_var(p, &mut seen);
        }
        for lit in self.preconditions.iter().chain(self.effects.iter()) {
            for arg in &lit.atom.args {
                push_if_var(arg, &mut seen);
            }
        }
        seen
    }
}

/// A fully-parsed, not-yet-grounded planning problem.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    /// Constants in first-occurrence order (set-valued: no duplicates).
    pub constants: Vec<String>,
    pub initial: Vec<SignedAtom>,
    pub goal: Vec<SignedAtom>,
    pub schemas: Vec<ActionSchema>,
}

impl Problem {
    pub fn new() -> Self {
        Problem::default()
    }

    /// Parses an entire `.dat` source, line by line, accumulating state
    /// into a fresh [`Problem`]. Stops at (and returns) the first
    /// malformed line.
    pub fn parse(source: &str) -> Result<Problem, err::Parse> {
        let mut problem = Problem::new();
        for (idx, line) in source.lines().enumerate() {
            let line_no = idx + 1;
            match parse_line(line, line_no)? {
                ParsedLine::Blank => {}
                ParsedLine::Initial(atoms) => {
                    for atom in &atoms {
                        problem.register_constants(atom);
                    }
                    problem.initial.extend(atoms);
                }
                ParsedLine::Goal(atoms) => {
                    for atom in &atoms {
                        problem.register_constants(atom);
                    }
                    problem.goal.extend(atoms);
                }
                ParsedLine::Action(schema) => {
                    for p in &schema.params {
                        problem.register_constant_token(p);
                    }
                    for lit in schema.preconditions.iter().chain(schema.effects.iter()) {
                        problem.register_constants(lit);
                    }
                    problem.schemas.push(schema);
                }
            }
        }
        log::debug!(
            target: targets::PARSE,
            "parsed problem: {} constant(s), {} initial atom(s), {} goal atom(s), {} schema(s)",
            problem.constants.len(),
            problem.initial.len(),
            problem.goal.len(),
            problem.schemas.len()
        );
        Ok(problem)
    }

    fn register_constants(&mut self, atom: &SignedAtom) {
        for arg in &atom.atom.args {
            self.register_constant_token(arg);
        }
    }

    fn register_constant_token(&mut self, token: &str) {
        if !is_variable(token) && !self.constants.iter().any(|c| c == token) {
            self.constants.push(token.to_string());
        }
    }
}

/// A token is a variable if its first character is a lowercase ASCII
/// letter; everything else (including digits and uppercase-initial
/// alphanumerics) is a constant.
pub fn is_variable(token: &str) -> bool {
    token
        .chars()
        .next()
        .map(|c| c.is_ascii_lowercase())
        .unwrap_or(false)
}

/// The result of parsing one non-blank `.dat` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Blank,
    Initial(Vec<SignedAtom>),
    Goal(Vec<SignedAtom>),
    Action(ActionSchema),
}

/// Parses a single `.dat` line (1-indexed `line_no`, used for error
/// reporting only).
pub fn parse_line(line: &str, line_no: usize) -> Result<ParsedLine, err::Parse> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ParsedLine::Blank);
    }

    let mut chars = trimmed.splitn(2, char::is_whitespace);
    let prefix = chars.next().unwrap_or("");
    let rest = chars.next().unwrap_or("").trim();

    match prefix {
        "I" => {
            let atoms = parse_atoms(rest, line_no)?;
            Ok(ParsedLine::Initial(atoms))
        }
        "G" => {
            let atoms = parse_atoms(rest, line_no)?;
            Ok(ParsedLine::Goal(atoms))
        }
        "A" => parse_action(rest, line_no).map(ParsedLine::Action),
        _ => Err(err::Parse {
            kind: err::ParseErrorKind::UnrecognisedPrefix,
            line: line_no,
            text: trimmed.to_string(),
        }),
    }
}

fn parse_action(rest: &str, line_no: usize) -> Result<ActionSchema, err::Parse> {
    let colon = rest.find(':').ok_or_else(|| err::Parse {
        kind: err::ParseErrorKind::MissingColon,
        line: line_no,
        text: rest.to_string(),
    })?;
    let (head, body) = rest.split_at(colon);
    let body = &body[1..]; // drop the ':'

    let arrow = body.find("->").ok_or_else(|| err::Parse {
        kind: err::ParseErrorKind::MissingArrow,
        line: line_no,
        text: rest.to_string(),
    })?;
    let (pre_str, eff_str) = body.split_at(arrow);
    let eff_str = &eff_str[2..]; // drop the '->'

    let head_atom = parse_single_atom(head.trim(), line_no)?;
    let preconditions = parse_atoms(pre_str.trim(), line_no)?;
    let effects = parse_atoms(eff_str.trim(), line_no)?;

    log::trace!(
        target: targets::PARSE,
        "parsed action schema {} with {} param(s)",
        head_atom.predicate,
        head_atom.args.len()
    );

    Ok(ActionSchema {
        name: head_atom.predicate,
        params: head_atom.args,
        preconditions,
        effects,
    })
}

/// Parses a single, always-positive `name(args)` head (an action
/// schema's head is never negated).
fn parse_single_atom(text: &str, line_no: usize) -> Result<AtomTerm, err::Parse> {
    let atoms = parse_atoms(text, line_no)?;
    atoms
        .into_iter()
        .next()
        .map(|signed| signed.atom)
        .ok_or_else(|| err::Parse {
            kind: err::ParseErrorKind::MalformedAtom,
            line: line_no,
            text: text.to_string(),
        })
}

/// Scans a whitespace-separated run of `["-"] predicate(arg,arg,…)`
/// tokens. Arguments may have whitespace around the commas and
/// parentheses; this is normalised away on parse.
fn parse_atoms(text: &str, line_no: usize) -> Result<Vec<SignedAtom>, err::Parse> {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut atoms = Vec::new();

    let malformed = |text: &str, line_no: usize| err::Parse {
        kind: err::ParseErrorKind::MalformedAtom,
        line: line_no,
        text: text.to_string(),
    };

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i] as char).is_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let mut positive = true;
        if bytes[i] == b'-' {
            positive = false;
            i += 1;
        }

        let pred_start = i;
        while i < bytes.len() && bytes[i] != b'(' && !(bytes[i] as char).is_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'(' {
            return Err(malformed(text, line_no));
        }
        let predicate = text[pred_start..i].trim().to_string();
        if predicate.is_empty() {
            return Err(malformed(text, line_no));
        }
        i += 1; // skip '('

        let args_start = i;
        while i < bytes.len() && bytes[i] != b')' {
            i += 1;
        }
        if i >= bytes.len() {
            return Err(malformed(text, line_no));
        }
        let args_str = &text[args_start..i];
        i += 1; // skip ')'

        let args: Vec<String> = args_str
            .split(',')
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        atoms.push(SignedAtom {
            positive,
            atom: AtomTerm { predicate, args },
        });
    }

    Ok(atoms)
}
