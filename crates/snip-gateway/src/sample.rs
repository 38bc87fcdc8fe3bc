use rand::Rng;
use snip_core::{ClickMetadata, Location};

pub(crate) struct SampleLink {
    pub target_url: &'static str,
    pub alias: Option<&'static str>,
}

pub(crate) const SAMPLE_LINKS: &[SampleLink] = &[
    SampleLink {
        target_url: "https://www.google.com/search?q=react+tutorial",
        alias: Some("reacttut"),
    },
    SampleLink {
        target_url: "https://github.com/facebook/react",
        alias: Some("reactgh"),
    },
    SampleLink {
        target_url: "https://stackoverflow.com/questions/tagged/javascript",
        alias: None,
    },
];

pub(crate) const MAX_VISITS: usize = 10;

// "direct" is listed three times to weight it.
const REFERRERS: &[&str] = &[
    "google.com",
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "reddit.com",
    "direct",
    "direct",
    "direct",
];

const LOCATIONS: &[(&str, &str)] = &[
    ("New York", "United States"),
    ("London", "United Kingdom"),
    ("Mumbai", "India"),
    ("Tokyo", "Japan"),
    ("Sydney", "Australia"),
    ("Berlin", "Germany"),
    ("Toronto", "Canada"),
    ("São Paulo", "Brazil"),
];

const USER_AGENT: &str = "snip-seed";

/// Between one and [`MAX_VISITS`] simulated visits.
pub(crate) fn visits<R: Rng + ?Sized>(rng: &mut R) -> Vec<ClickMetadata> {
    let count = rng.random_range(1..=MAX_VISITS);
    (0..count).map(|_| visit(rng)).collect()
}

fn visit<R: Rng + ?Sized>(rng: &mut R) -> ClickMetadata {
    let referrer = REFERRERS[rng.random_range(0..REFERRERS.len())];
    let (city, country) = LOCATIONS[rng.random_range(0..LOCATIONS.len())];
    ClickMetadata {
        referrer: Some(referrer.to_string()),
        location: Some(Location {
            city: Some(city.to_string()),
            country: Some(country.to_string()),
        }),
        user_agent: Some(USER_AGENT.to_string()),
    }
}
