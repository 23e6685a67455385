use regex::Regex;

/// Compile a hardcoded pattern; an invalid pattern degrades to one that never matches.
#[must_use]
pub fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(compile_err) => {
            tracing::error!(pattern, error = %compile_err, "invalid builtin pattern");
            match Regex::new(r"$^") {
                Ok(fallback) => fallback,
                Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
            }
        }
    }
}
