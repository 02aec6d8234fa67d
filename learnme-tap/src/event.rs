/// One record of a TAP stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapEvent {
    /// `TAP version N`
    Version(u32),
    /// `1..N`
    Plan(Plan),
    /// `ok` / `not ok` test point
    Assert(Assert),
    /// A nested subtest stream
    Child(Vec<TapEvent>),
    /// `# text`
    Comment(String),
    /// `Bail out! reason`
    BailOut(Option<String>),
    /// `pragma +name` / `pragma -name`
    Pragma { enabled: bool, name: String },
    /// Any line that is not TAP
    Extra(String),
}

/// A test plan line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub start: u32,
    pub end: u32,
    /// Trailing `# reason`, e.g. for skipped suites (`1..0 # no tests`)
    pub comment: Option<String>,
}

/// A single test point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assert {
    /// Test number, when present
    pub id: Option<u32>,
    pub ok: bool,
    /// Description without the leading `- `
    pub name: String,
    /// Description prefixed by the names of the enclosing subtests
    pub fullname: String,
    pub directive: Option<Directive>,
}

/// `# SKIP` / `# TODO` directive on a test point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Skip(String),
    Todo(String),
}
