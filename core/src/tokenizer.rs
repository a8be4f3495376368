use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    // Bengali vowel signs, hasanta and nukta are combining marks.
    static ref BN_RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{M}\p{N}\x{200C}\x{200D}]*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
    // Stored NFKC-normalized so they compare equal to normalized input.
    static ref BN_STOPWORDS: HashSet<String> = {
        let words: &[&str] = &[
            "অতএব","অথচ","অথবা","অনুযায়ী","অনেক","অনেকে","অনেকেই","অন্তত","অন্য","অবধি","অবশ্য","অর্থাৎ",
            "আই","আগামী","আগে","আগেই","আছে","আজ","আদ্যভাগে","আপনার","আপনি","আবার","আমরা","আমাকে","আমাদের","আমার","আমি","আর","আরও",
            "ই","ইত্যাদি","উনি","উপর","উপরে","এ","এঁদের","এঁরা","এই","একই","একটি","একবার","একে","এক্","এখন","এখনও","এখানে","এখানেই","এটা","এটাই","এটি","এত","এতটাই","এতে","এদের","এব","এবং","এবার","এমন","এমনকী","এমনি","এর","এরা","এল","এস","এসে",
            "ও","ওঁদের","ওঁর","ওঁরা","ওই","ওকে","ওখানে","ওদের","ওর","ওরা",
            "কখনও","কত","কবে","কয়েক","কয়েকটি","করছে","করছেন","করতে","করবে","করবেন","করলে","করলেন","করা","করাই","করায়","করার","করি","করিতে","করিয়া","করিয়ে","করে","করেই","করেছিলেন","করেছে","করেছেন","করেন","কাউকে","কাছ","কাছে","কাজ","কাজে","কারও","কারণ","কি","কিংবা","কিছু","কিছুই","কিন্তু","কী","কে","কেউ","কেউই","কেন","কোন","কোনও","কোনো",
            "গিয়ে","গিয়েছে","গেছে","গেল","গেলে","গোটা","চলে","ছাড়া","ছাড়াও","ছিল","ছিলেন","জন","জন্য","জানতে","জানা","জানানো","জানায়","জানিয়ে","জানিয়েছে","টি","ঠিক",
            "তখন","তত","তথা","তবু","তবে","তা","তাঁকে","তাঁদের","তাঁর","তাঁরা","তাই","তাও","তাকে","তাতে","তাদের","তার","তারপর","তারা","তাহলে","তিনি","তিনিও","তুমি","তুলে","তেমন","তো","তোমার",
            "থাকবে","থাকবেন","থাকা","থাকায়","থাকে","থাকেন","থেকে","থেকেই","থেকেও","দিকে","দিতে","দিয়ে","দিয়েছে","দিয়েছেন","দিলেন","দু","দুটি","দুটো","দেওয়া","দেওয়ার","দেখতে","দেখা","দেখে","দেন","দেয়",
            "ধরা","ধরে","নয়","না","নাই","নাকি","নাগাদ","নানা","নিজে","নিজেই","নিজেদের","নিজের","নিতে","নিয়ে","নেই","নেওয়া","নেওয়ার",
            "পক্ষে","পর","পরে","পরেই","পরেও","পর্যন্ত","পাওয়া","পারি","পারে","পারেন","পেয়ে","প্রতি","প্রভৃতি","প্রায়",
            "ফলে","ফিরে","বদলে","বরং","বলতে","বলল","বললেন","বলা","বলে","বলেছেন","বলেন","বসে","বহু","বা","বাদে","বার","বিনা","বিভিন্ন","বিশেষ","বেশ","বেশি",
            "ভাবে","ভাবেই","মতো","মতোই","মধ্যভাগে","মধ্যে","মধ্যেই","মধ্যেও","মনে","মাত্র","মোট","মোটেই",
            "যখন","যত","যতটা","যথেষ্ট","যদি","যদিও","যা","যাঁর","যাঁরা","যাওয়া","যাওয়ার","যাকে","যাচ্ছে","যাতে","যাদের","যান","যাবে","যায়","যার","যারা","যিনি","যে","যেখানে","যেতে","যেন","যেমন",
            "রকম","রয়েছে","রাখা","রেখে","শুধু","শুরু","সঙ্গে","সঙ্গেও","সব","সবার","সমস্ত","সম্প্রতি","সহ","সাধারণ","সামনে","সুতরাং","সে","সেই","সেখান","সেখানে","সেটা","সেটাই","সেটাও","সেটি","স্পষ্ট","স্বয়ং",
            "হইতে","হইবে","হইয়া","হওয়া","হওয়ায়","হওয়ার","হচ্ছে","হত","হতে","হতেই","হন","হবে","হবেন","হয়","হয়তো","হয়নি","হয়ে","হয়েই","হয়েছিল","হয়েছে","হয়েছেন","হল","হলে","হলেই","হলেও","হলো","হিসাবে","হিসেবে","হৈলে","হোক"
        ];
        words.iter().map(|w| w.nfkc().collect::<String>()).collect()
    };
    // Inflectional suffixes, longest first.
    static ref BN_SUFFIXES: Vec<String> = {
        let suffixes: &[&str] = &[
            "গুলোতে","গুলিতে","দেরকে","গুলোর","গুলির","গুলোকে","গুলিকে",
            "গুলো","গুলি","দিগকে","দের","েরা","য়ের","কেই","টিকে","টাকে","টির","টার","খানা","খানি",
            "েরই","েই","ের","কে","রা","টি","টা","তে","য়","েও",
            "ে","র","ও",
        ];
        let mut out: Vec<String> = suffixes.iter().map(|s| s.nfkc().collect::<String>()).collect();
        out.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        out
    };
}

/// Turns raw text into the ordered sequence of normalized terms that gets indexed.
pub trait Analyzer {
    fn analyze(&self, text: &str) -> Vec<String>;
    /// Stem a single already-lowercased word, without stopword filtering.
    fn stem(&self, word: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Bengali,
}

impl Language {
    pub fn analyzer(self) -> Box<dyn Analyzer> {
        match self {
            Language::English => Box::new(EnglishAnalyzer),
            Language::Bengali => Box::new(BengaliAnalyzer),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "bengali" | "bn" => Ok(Language::Bengali),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("english"),
            Language::Bengali => f.write_str("bengali"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishAnalyzer;

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> { tokenize(text) }

    fn stem(&self, word: &str) -> String { STEMMER.stem(word).to_string() }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BengaliAnalyzer;

impl Analyzer for BengaliAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        BN_RE
            .find_iter(&normalized)
            .map(|m| m.as_str())
            .filter(|token| !BN_STOPWORDS.contains(*token))
            .map(stem_bengali)
            .collect()
    }

    fn stem(&self, word: &str) -> String {
        let normalized = word.nfkc().collect::<String>();
        stem_bengali(&normalized)
    }
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Tokenize English text using NFKC normalization, lowercase, stopword removal, and stemming.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    let mut tokens = Vec::new();
    for mat in RE.find_iter(&normalized) {
        let token = mat.as_str();
        if is_stopword(token) { continue; }
        tokens.push(STEMMER.stem(token).to_string());
    }
    tokens
}

/// Strip the longest matching inflectional suffix, keeping at least two characters of stem.
fn stem_bengali(word: &str) -> String {
    let len = word.chars().count();
    for suffix in BN_SUFFIXES.iter() {
        if word.ends_with(suffix.as_str()) && len - suffix.chars().count() >= 2 {
            return word[..word.len() - suffix.len()].to_string();
        }
    }
    word.to_string()
}
