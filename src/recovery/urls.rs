use url::Url;

/// Domain typos the generator is known to produce, fixed before render or
/// export. Applied once; normalization is idempotent.
const DOMAIN_TYPO_FIXES: [(&str, &str); 3] = [
    ("github.cm", "github.com"),
    ("linkedin.cm", "linkedin.com"),
    ("behance.nt", "behance.net"),
];

/// Normalize a URL-ish string: trim, reject placeholders, correct known
/// domain typos, and prefix `https://` when no scheme is present. Returns
/// `None` for anything that still fails to parse as a URL.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        return None;
    }

    let mut fixed = trimmed.to_string();
    for (typo, correct) in DOMAIN_TYPO_FIXES {
        // `github.com` contains no `github.cm` substring, so re-running the
        // replacement on an already-corrected URL is a no-op.
        if fixed.contains(typo) {
            fixed = fixed.replace(typo, correct);
        }
    }

    if !fixed.starts_with("http://") && !fixed.starts_with("https://") {
        fixed = format!("https://{fixed}");
    }

    Url::parse(&fixed).ok()?;
    Some(fixed)
}

/// Normalize a newline-separated block of URLs, dropping anything that does
/// not survive normalization or is too short to be a real link.
pub fn normalize_url_block(block: &str) -> Vec<String> {
    block
        .lines()
        .filter_map(normalize_url)
        .filter(|u| u.chars().count() > 5)
        .collect()
}
