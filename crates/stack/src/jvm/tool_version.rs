use std::cmp::Ordering;
use std::fmt;

/// A build tool release such as `7.6`, `8.0-rc-1` or `3.9.6`.
///
/// Only the leading numeric components take part in comparison, and missing
/// components count as zero, so `8`, `8.0` and `8.0-rc-1` compare equal.
#[derive(Debug, Clone)]
pub struct ToolVersion {
    raw: String,
    components: Vec<u32>,
}

impl ToolVersion {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let mut components = Vec::new();

        for segment in raw.split('.') {
            let end = segment
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(segment.len());
            match segment[..end].parse::<u32>() {
                Ok(n) => components.push(n),
                Err(_) => break,
            }
            if end < segment.len() {
                break;
            }
        }

        if components.is_empty() {
            return None;
        }

        Some(Self {
            raw: raw.to_string(),
            components,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> u32 {
        self.component(0)
    }

    pub fn minor(&self) -> u32 {
        self.component(1)
    }

    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major(), self.minor()) >= (major, minor)
    }

    fn component(&self, index: usize) -> u32 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl PartialEq for ToolVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToolVersion {}

impl PartialOrd for ToolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ToolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
