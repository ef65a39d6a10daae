use crate::error::{ReleaseBotError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Release version made of dotted numeric components (e.g. "v12", "1.4", "2.0.1").
///
/// Equality and ordering are structural: components are compared one by one
/// as integers, so `1.10` sorts after `1.9`. A parsed version displays as the
/// text it was parsed from (without the `v` marker), so `2024.01` stays
/// `2024.01`; computed versions display their plain components.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
    source: Option<String>,
}

/// Semantic version bump type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

/// How the next version is derived from the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPolicy {
    /// Increment the trailing component only
    Plain,
    /// Bump a `major.minor.patch` triple
    Semantic(VersionBump),
}

/// A tag name together with the version it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub name: String,
    pub version: Version,
}

impl Version {
    /// Create a version from its components
    pub fn new(components: Vec<u64>) -> Self {
        Version {
            components,
            source: None,
        }
    }

    /// Parse a version from a tag string (e.g., "v1.2" -> [1, 2])
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let body = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        if body.is_empty() {
            return Err(ReleaseBotError::version(format!(
                "Invalid version format: '{}' - no version number",
                tag
            )));
        }

        let components = body
            .split('.')
            .map(|part| {
                // u64::from_str would let a leading '+' through
                if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                    return Err(ReleaseBotError::version(format!(
                        "Invalid version component '{}' in '{}'",
                        part, tag
                    )));
                }
                part.parse::<u64>().map_err(|_| {
                    ReleaseBotError::version(format!(
                        "Invalid version component '{}' in '{}'",
                        part, tag
                    ))
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        Ok(Version {
            components,
            source: Some(body.to_string()),
        })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Name of the release tag for this version
    pub fn tag_name(&self) -> String {
        format!("v{}", self)
    }

    /// Increment the trailing component, leaving all others unchanged
    pub fn autoincrement(&self) -> Result<Self> {
        let mut components = self.components.clone();
        if let Some(last) = components.last_mut() {
            *last = increment(*last, self)?;
        }
        Ok(Version::new(components))
    }

    /// Interpret this version as `major.minor.patch`.
    ///
    /// Missing trailing components are treated as zero; more than three
    /// components cannot be represented and are rejected.
    pub fn to_semver(&self) -> Result<semver::Version> {
        if self.components.len() > 3 {
            return Err(ReleaseBotError::version(format!(
                "Invalid semantic version: '{}' - expected at most X.Y.Z",
                self
            )));
        }
        let get = |i: usize| self.components.get(i).copied().unwrap_or(0);
        Ok(semver::Version::new(get(0), get(1), get(2)))
    }

    /// Bump according to the semantic versioning rules
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let mut next = self.to_semver()?;
        match bump_type {
            VersionBump::Major => {
                next.major = increment(next.major, self)?;
                next.minor = 0;
                next.patch = 0;
            }
            VersionBump::Minor => {
                next.minor = increment(next.minor, self)?;
                next.patch = 0;
            }
            VersionBump::Patch => {
                next.patch = increment(next.patch, self)?;
            }
        }
        Ok(Version::from(next))
    }
}

fn increment(component: u64, version: &Version) -> Result<u64> {
    component.checked_add(1).ok_or_else(|| {
        ReleaseBotError::version(format!("Cannot increment version '{}': component overflow", version))
    })
}

impl From<semver::Version> for Version {
    fn from(v: semver::Version) -> Self {
        Version::new(vec![v.major, v.minor, v.patch])
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            return f.write_str(source);
        }
        let parts: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl VersionBump {
    pub fn name(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tags like "v1.2" or "3" are release tags; "nightly" or "docs-1" are not.
fn looks_like_version(tag: &str) -> bool {
    let body = tag
        .strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag);
    body.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Pick the highest release tag out of a list of tag names.
///
/// Non-release tags are skipped. A tag that looks like a release but fails to
/// parse is an error rather than being silently ignored.
pub fn latest_version_tag(tags: &[String]) -> Result<Option<VersionTag>> {
    let mut latest: Option<VersionTag> = None;

    for name in tags.iter().filter(|t| looks_like_version(t)) {
        let version = Version::parse(name)?;
        let is_newer = latest
            .as_ref()
            .map(|current| version > current.version)
            .unwrap_or(true);
        if is_newer {
            latest = Some(VersionTag {
                name: name.clone(),
                version,
            });
        }
    }

    Ok(latest)
}

/// Compute the version following `prior` under the given policy.
pub fn next_version(prior: Option<&Version>, policy: VersionPolicy) -> Result<Version> {
    match (prior, policy) {
        (None, VersionPolicy::Plain) => Ok(Version::new(vec![1])),
        (None, VersionPolicy::Semantic(VersionBump::Major)) => Ok(Version::new(vec![1, 0, 0])),
        (None, VersionPolicy::Semantic(VersionBump::Minor)) => Ok(Version::new(vec![0, 1, 0])),
        (None, VersionPolicy::Semantic(VersionBump::Patch)) => Ok(Version::new(vec![0, 0, 1])),
        (Some(prior), VersionPolicy::Plain) => prior.autoincrement(),
        (Some(prior), VersionPolicy::Semantic(bump)) => prior.bump(bump),
    }
}
