use core::fmt::{self, Write};

/// A single step from a value to one of its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// A struct field, by the name it is matched under.
    Field(&'static str),
    /// A list or array element.
    Index(usize),
    /// A map entry, by its rendered key.
    Key(String),
    /// Through an option, pointer, nullable or dynamic wrapper.
    Deref,
    /// The return value of a getter.
    Getter(&'static str),
    /// The argument of a setter.
    Setter(&'static str),
}

/// Where in a (destination) value something happened, as a series of steps
/// from the root.
///
/// Renders as `detail.notes[1]`, `["key"].name` or `role()`, and as
/// `<root>` when empty. [`PathStep::Deref`] steps are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// An empty path, pointing at the root.
    pub const fn new() -> Self {
        Path { steps: Vec::new() }
    }

    /// Push a step onto the path.
    pub fn push(&mut self, step: PathStep) {
        self.steps.push(step);
    }

    /// Pop the last step from the path.
    pub fn pop(&mut self) -> Option<PathStep> {
        self.steps.pop()
    }

    /// Returns a copy of this path with `step` appended.
    pub fn with(&self, step: PathStep) -> Self {
        let mut path = self.clone();
        path.push(step);
        path
    }

    /// Get the steps in this path.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Get the length of this path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if this path is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_any = false;
        for step in &self.steps {
            match step {
                PathStep::Field(name) | PathStep::Getter(name) | PathStep::Setter(name) => {
                    if wrote_any {
                        f.write_char('.')?;
                    }
                    f.write_str(name)?;
                    if !matches!(step, PathStep::Field(_)) {
                        f.write_str("()")?;
                    }
                }
                PathStep::Index(i) => write!(f, "[{i}]")?,
                PathStep::Key(key) => write!(f, "[{key}]")?,
                PathStep::Deref => continue,
            }
            wrote_any = true;
        }
        if !wrote_any {
            f.write_str("<root>")?;
        }
        Ok(())
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Path {
            steps: iter.into_iter().collect(),
        }
    }
}
