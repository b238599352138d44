//! Static word lists backing the built-in pipelines.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "one", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
    "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves", "there’s", "it’s", "that’s", "they’ve", "said", "says", "like",
    "many", "well", "since", "according", "including", "however", "today", "yesterday",
];

pub const FINNISH_STOP_WORDS: &[&str] = &[
    "ja", "on", "ei", "se", "että", "hän", "oli", "ole", "olla", "mutta", "kun", "niin", "tai",
    "jos", "kuin", "myös", "vain", "sekä", "ovat", "joka", "jotka", "mikä", "sen", "siitä",
    "tämä", "tässä", "nyt", "me", "he", "te", "minä", "sinä", "vuonna", "noin",
];

pub const SWEDISH_STOP_WORDS: &[&str] = &[
    "och", "att", "det", "som", "en", "på", "är", "av", "för", "med", "till", "den", "har",
    "de", "inte", "om", "ett", "han", "hon", "var", "jag", "men", "så", "från", "vi", "kan",
    "när", "eller", "efter", "också", "under", "sina", "sitt",
];

/// Stop words for a language code; `xx` merges every known list.
pub fn stop_words(language: &str) -> HashSet<&'static str> {
    let lists: &[&[&str]] = match language {
        "en" => &[ENGLISH_STOP_WORDS],
        "fi" => &[FINNISH_STOP_WORDS],
        "sv" => &[SWEDISH_STOP_WORDS],
        _ => &[ENGLISH_STOP_WORDS, FINNISH_STOP_WORDS, SWEDISH_STOP_WORDS],
    };
    lists.iter().flat_map(|list| list.iter().copied()).collect()
}

pub const ENGLISH_MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec",
];

pub const SCALE_WORDS: &[&str] = &[
    "thousand", "million", "billion", "trillion", "m", "mn", "b", "bn", "k",
];

pub const CURRENCY_SYMBOLS: &[&str] = &["$", "€", "£", "¥"];

/// Trailing words marking an organisation name.
pub const ORG_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "company", "co", "ltd", "llc", "plc", "group", "ventures",
    "capital", "partners", "bank", "university", "institute", "labs", "technologies", "systems",
    "foundation", "association", "collaborative", "oy", "ab", "holdings", "restaurants",
];

/// Coarse entity classes before mapping to a model's label scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Person,
    Org,
    Place,
    Nationality,
    Date,
    Money,
    Percent,
    Cardinal,
}

pub static GAZETTEER: Lazy<HashMap<&'static str, EntityClass>> = Lazy::new(|| {
    let orgs = [
        "apple", "google", "microsoft", "amazon", "meta", "facebook", "tesla", "nokia",
        "ericsson", "spotify", "volvo", "ikea", "qualcomm", "intel", "nvidia", "samsung",
        "ibm", "oracle", "netflix", "statista", "reuters", "census", "sulapac", "tive",
        "fifth wall", "four seasons", "caesars palace",
    ];
    let places = [
        "finland", "sweden", "norway", "denmark", "germany", "france", "china", "japan",
        "india", "europe", "asia", "africa", "america", "united states", "usa", "u.s",
        "united kingdom", "uk", "london", "paris", "berlin", "helsinki", "stockholm", "espoo",
        "tampere", "gothenburg", "new york", "california", "dubai", "united arab emirates",
        "uae", "emirates", "tokyo", "beijing",
    ];
    let nationalities = [
        "finnish", "swedish", "american", "british", "german", "french", "chinese",
        "japanese", "european", "norwegian", "danish", "emirati",
    ];
    let mut map = HashMap::new();
    map.extend(orgs.into_iter().map(|name| (name, EntityClass::Org)));
    map.extend(places.into_iter().map(|name| (name, EntityClass::Place)));
    map.extend(nationalities.into_iter().map(|name| (name, EntityClass::Nationality)));
    map
});

/// Polarity, subjectivity and intensity of an opinion word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opinion {
    pub polarity: f64,
    pub subjectivity: f64,
    pub intensity: f64,
}

const fn opinion(polarity: f64, subjectivity: f64) -> Opinion {
    Opinion {
        polarity,
        subjectivity,
        intensity: 1.0,
    }
}

/// English opinion lexicon.
pub static OPINION_WORDS: Lazy<HashMap<&'static str, Opinion>> = Lazy::new(|| {
    HashMap::from([
        ("good", opinion(0.7, 0.6)),
        ("great", opinion(0.8, 0.75)),
        ("excellent", opinion(1.0, 1.0)),
        ("amazing", opinion(0.6, 0.9)),
        ("wonderful", opinion(1.0, 1.0)),
        ("best", opinion(1.0, 0.3)),
        ("better", opinion(0.5, 0.5)),
        ("happy", opinion(0.8, 1.0)),
        ("delighted", opinion(0.7, 0.8)),
        ("love", opinion(0.5, 0.6)),
        ("easy", opinion(0.43, 0.83)),
        ("simple", opinion(0.0, 0.36)),
        ("new", opinion(0.14, 0.45)),
        ("innovative", opinion(0.5, 0.75)),
        ("intuitive", opinion(0.5, 0.5)),
        ("advanced", opinion(0.4, 0.6)),
        ("leading", opinion(0.3, 0.4)),
        ("growing", opinion(0.2, 0.3)),
        ("sustainable", opinion(0.3, 0.5)),
        ("premium", opinion(0.4, 0.5)),
        ("luxury", opinion(0.3, 0.6)),
        ("successful", opinion(0.75, 0.95)),
        ("strong", opinion(0.43, 0.73)),
        ("high", opinion(0.16, 0.54)),
        ("global", opinion(0.0, 0.0)),
        ("bad", opinion(-0.7, 0.67)),
        ("terrible", opinion(-1.0, 1.0)),
        ("awful", opinion(-1.0, 1.0)),
        ("horrible", opinion(-1.0, 1.0)),
        ("worst", opinion(-1.0, 1.0)),
        ("worse", opinion(-0.4, 0.6)),
        ("poor", opinion(-0.4, 0.6)),
        ("sad", opinion(-0.5, 1.0)),
        ("angry", opinion(-0.5, 1.0)),
        ("hate", opinion(-0.8, 0.9)),
        ("disappointed", opinion(-0.75, 0.75)),
        ("costly", opinion(-0.3, 0.6)),
        ("difficult", opinion(-0.5, 1.0)),
        ("damaged", opinion(-0.2, 0.4)),
        ("spoiled", opinion(-0.3, 0.5)),
        ("rejected", opinion(-0.3, 0.4)),
        ("delayed", opinion(-0.2, 0.3)),
        ("conventional", opinion(0.0, 0.1)),
        ("real", opinion(0.2, 0.3)),
        ("live", opinion(0.14, 0.5)),
        ("likely", opinion(0.0, 1.0)),
        ("potentially", opinion(0.0, 1.0)),
    ])
});

/// Words scaling the next opinion word's polarity.
pub static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("very", 1.3),
        ("really", 1.2),
        ("extremely", 1.5),
        ("truly", 1.2),
        ("most", 1.3),
        ("more", 1.2),
        ("rapidly", 1.1),
        ("slightly", 0.6),
        ("somewhat", 0.7),
    ])
});

/// Words flipping the next opinion word; polarity is scaled by -0.5.
pub const NEGATIONS: &[&str] = &["not", "never", "no", "n't", "cannot", "without"];
