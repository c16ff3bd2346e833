use glob::Pattern;

/// Include/exclude glob patterns matched against `owner/repo`.
#[derive(Debug, Clone, Default)]
pub struct RepositoryFilter {
    include_patterns: Vec<Pattern>,
    exclude_patterns: Vec<Pattern>,
}

impl RepositoryFilter {
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self, glob::PatternError> {
        let include_patterns = parse_patterns(include)?;
        let exclude_patterns = parse_patterns(exclude)?;

        Ok(RepositoryFilter {
            include_patterns,
            exclude_patterns,
        })
    }

    pub fn should_process(&self, repository: &str) -> bool {
        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(repository))
        {
            return false;
        }

        self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|pattern| pattern.matches(repository))
    }
}

/// Comma-separated patterns; blanks are skipped.
fn parse_patterns(list: Option<&str>) -> Result<Vec<Pattern>, glob::PatternError> {
    list.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Pattern::new)
        .collect()
}
