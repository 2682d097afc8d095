use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::normalize_package_name;

/// One library named by a requirements file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    name: String,
    extras: Vec<String>,
    specifier: Option<String>,
    marker: Option<String>,
    line: usize,
}

impl Requirement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extras: Vec::new(),
            specifier: None,
            marker: None,
            line: 0,
        }
    }

    pub fn with_extras(mut self, extras: Vec<String>) -> Self {
        self.extras = extras;
        self
    }

    pub fn with_specifier(mut self, specifier: impl Into<String>) -> Self {
        self.specifier = Some(specifier.into());
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    pub fn specifier(&self) -> Option<&str> {
        self.specifier.as_deref()
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn normalized_name(&self) -> String {
        normalize_package_name(&self.name)
    }

    /// Import names to try when installed metadata does not list any.
    pub fn import_candidates(&self) -> Vec<String> {
        let base = self.name.replace(['-', '.'], "_");
        let lower = base.to_lowercase();

        let mut candidates = vec![base];
        if lower != candidates[0] {
            candidates.push(lower);
        }
        candidates
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        if let Some(specifier) = &self.specifier {
            write!(f, "{}", specifier)?;
        }
        if let Some(marker) = &self.marker {
            write!(f, "; {}", marker)?;
        }
        Ok(())
    }
}

/// What a single line of a requirements file means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementLine {
    Requirement(Requirement),
    /// `-r other.txt` / `--requirement other.txt`
    Include(String),
    Skip,
}

impl RequirementLine {
    pub fn parse(raw: &str, line_number: usize) -> Self {
        // Editors on Windows prefix the first line with a byte order mark.
        let raw = if line_number == 1 {
            raw.trim_start_matches('\u{feff}')
        } else {
            raw
        };
        let line = strip_inline_comment(raw).trim();

        if line.is_empty() {
            return RequirementLine::Skip;
        }

        if line.starts_with('-') {
            return match include_target(line) {
                Some(target) => RequirementLine::Include(target.to_string()),
                None => {
                    debug!("Ignoring pip option on line {}: {}", line_number, line);
                    RequirementLine::Skip
                }
            };
        }

        match parse_requirement(line) {
            Some(requirement) => RequirementLine::Requirement(requirement.with_line(line_number)),
            None => {
                debug!("Ignoring unrecognised requirement on line {}: {}", line_number, line);
                RequirementLine::Skip
            }
        }
    }
}

/// Parses requirements file content, ignoring includes.
pub fn parse_requirements(content: &str) -> Vec<Requirement> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match RequirementLine::parse(line, i + 1) {
            RequirementLine::Requirement(r) => Some(r),
            _ => None,
        })
        .collect()
}

fn strip_inline_comment(line: &str) -> &str {
    let mut prev_is_space = true;
    for (i, c) in line.char_indices() {
        if c == '#' && prev_is_space {
            return &line[..i];
        }
        prev_is_space = c.is_whitespace();
    }
    line
}

fn include_target(option: &str) -> Option<&str> {
    let rest = option
        .strip_prefix("--requirement")
        .or_else(|| option.strip_prefix("-r"))?;
    let rest = rest.strip_prefix('=').unwrap_or(rest).trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

fn parse_requirement(line: &str) -> Option<Requirement> {
    let (body, marker) = match line.split_once(';') {
        Some((body, marker)) => (body.trim(), Some(marker.trim())),
        None => (line, None),
    };
    let body = body.split_once('@').map_or(body, |(name, _)| name).trim();

    let (head, specifier) = if let Some(idx) = body.find("==") {
        (&body[..idx], Some(body[idx..].trim()))
    } else if let Some(idx) = body.find(['<', '>', '=', '!', '~']) {
        (&body[..idx], Some(body[idx..].trim()))
    } else {
        (body, None)
    };

    let (head, extras) = match (head.find('['), head.rfind(']')) {
        (Some(open), Some(close)) if open < close => {
            let extras = head[open + 1..close]
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect();
            (&head[..open], extras)
        }
        _ => (head, Vec::new()),
    };

    let name = head.split_whitespace().last()?;
    if !is_valid_name(name) {
        return None;
    }

    let mut requirement = Requirement::new(name).with_extras(extras);
    if let Some(specifier) = specifier.filter(|s| !s.is_empty()) {
        requirement = requirement.with_specifier(specifier);
    }
    if let Some(marker) = marker.filter(|m| !m.is_empty()) {
        requirement = requirement.with_marker(marker);
    }
    Some(requirement)
}

fn is_valid_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
