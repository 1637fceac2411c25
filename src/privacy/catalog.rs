//! Static catalog of personal-information categories
//!
//! Regex sources, gazetteers and placeholders are fixed at build time and
//! compiled once into [`Catalog::global`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kinds of personal information the masker recognises
///
/// Declaration order is the registration order: scanners run in this order
/// and it breaks ties between equally long spans over the same range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Email,
    Phone,
    Url,
    PostalCode,
    PersonName,
    PlaceName,
}

impl Category {
    /// Every category, in registration order
    pub const ALL: [Category; 6] = [
        Category::Email,
        Category::Phone,
        Category::Url,
        Category::PostalCode,
        Category::PersonName,
        Category::PlaceName,
    ];

    /// Stable identifier used in audit trails and JSON output
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Url => "URL",
            Self::PostalCode => "POSTAL_CODE",
            Self::PersonName => "PERSON_NAME",
            Self::PlaceName => "PLACE_NAME",
        }
    }

    /// Japanese display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Email => "メールアドレス",
            Self::Phone => "電話番号",
            Self::Url => "URL",
            Self::PostalCode => "郵便番号",
            Self::PersonName => "人名",
            Self::PlaceName => "地名",
        }
    }

    /// Text substituted for every span of this category
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Email => "[メールアドレス]",
            Self::Phone => "[電話番号]",
            Self::Url => "[URL]",
            Self::PostalCode => "[郵便番号]",
            Self::PersonName => "友人",
            Self::PlaceName => "近所",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Email => "Email addresses",
            Self::Phone => "Japanese phone numbers, with or without hyphens",
            Self::Url => "http and https URLs",
            Self::PostalCode => "Japanese postal codes, optionally prefixed with 〒",
            Self::PersonName => "Common surname + given name + honorific (さん, 様, ...)",
            Self::PlaceName => "Prefectures, cities and well-known districts",
        }
    }

    /// Position in registration order
    pub const fn rank(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Regex sources for the pattern-based categories
pub mod patterns {
    /// Email address
    pub const EMAIL: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

    /// Landline and mobile numbers: 0X-XXXX-XXXX style or 10-11 bare digits.
    /// ASCII digits only; full-width digits are left alone.
    pub const PHONE: &str = r"0[0-9]{1,4}-?[0-9]{1,4}-?[0-9]{4}|0[0-9]{9,10}";

    /// URL up to the next whitespace or angle bracket
    pub const URL: &str = r"https?://[^\s<>]+";

    /// Seven-digit postal code with optional 〒 mark and hyphen
    pub const POSTAL_CODE: &str = r"〒?[0-9]{3}-?[0-9]{4}";

    /// Characters that may follow a surname as part of a given name
    pub const NAME_CONTINUATION: &str = r"[一-龠ぁ-んァ-ヶー]";
}

/// Common Japanese surnames
pub const SURNAMES: &[&str] = &[
    "佐藤", "鈴木", "高橋", "田中", "伊藤", "渡辺", "山本", "中村", "小林", "加藤",
    "吉田", "山田", "佐々木", "山口", "松本", "井上", "木村", "林", "斎藤", "清水",
    "山崎", "森", "池田", "橋本", "阿部", "石川", "山下", "中島", "石井", "小川",
    "前田", "岡田", "長谷川", "藤田", "後藤", "近藤", "村上", "遠藤", "青木", "坂本",
    "西村", "福田", "太田", "岡本", "藤井", "西田", "中川", "原田", "中野", "藤原",
];

/// Honorific suffixes that close a person name
pub const HONORIFICS: &[&str] = &["さん", "くん", "ちゃん", "様", "氏"];

/// Prefectures, major cities and districts
pub const PLACES: &[&str] = &[
    // prefectures
    "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県",
    "茨城県", "栃木県", "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県",
    "新潟県", "富山県", "石川県", "福井県", "山梨県", "長野県",
    "岐阜県", "静岡県", "愛知県", "三重県",
    "滋賀県", "京都府", "大阪府", "兵庫県", "奈良県", "和歌山県",
    "鳥取県", "島根県", "岡山県", "広島県", "山口県",
    "徳島県", "香川県", "愛媛県", "高知県",
    "福岡県", "佐賀県", "長崎県", "熊本県", "大分県", "宮崎県", "鹿児島県", "沖縄県",
    // designated and major cities
    "札幌市", "仙台市", "新潟市", "横浜市", "川崎市", "名古屋市", "京都市", "大阪市", "神戸市",
    "広島市", "北九州市", "福岡市", "熊本市", "鹿児島市", "那覇市",
    // Nagasaki prefecture
    "長崎市", "佐世保市", "島原市", "諫早市", "大村市", "平戸市", "松浦市", "対馬市", "壱岐市",
    "五島市", "西海市", "雲仙市", "南島原市",
    "長与町", "時津町", "東彼杵町", "川棚町", "波佐見町",
    // Omura districts, alone and qualified by city
    "水主町", "竹松本町", "古賀島町", "富の原", "東本町", "西本町",
    "大村市水主町", "大村市竹松本町", "大村市古賀島町", "大村市富の原", "大村市東本町", "大村市西本町",
    // well-known districts
    "渋谷", "新宿", "池袋", "品川", "横浜", "川崎", "梅田", "難波", "天神", "博多",
];

/// Ordered set of literal strings searched by exact substring match
///
/// Entries are kept longest-first (by character count); entries of equal
/// length keep their declaration order. Duplicates are dropped.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<&'static str>,
}

impl Gazetteer {
    pub fn new(entries: &[&'static str]) -> Self {
        let mut sorted: Vec<&'static str> = Vec::with_capacity(entries.len());
        for &entry in entries {
            if !entry.is_empty() && !sorted.contains(&entry) {
                sorted.push(entry);
            }
        }
        // stable sort keeps declaration order among equal lengths
        sorted.sort_by_key(|e| std::cmp::Reverse(e.chars().count()));
        Self { entries: sorted }
    }

    /// Entries, longest first
    pub fn entries(&self) -> &[&'static str] {
        &self.entries
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| *e == entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How a category finds its spans
#[derive(Debug, Clone, Copy)]
pub enum PatternKind<'a> {
    /// Every non-overlapping regex match
    Regex(&'a Regex),
    /// Every literal occurrence, longest entries first, no self-overlap
    Gazetteer(&'a Gazetteer),
}

/// Compiled, read-only form of the catalog
#[derive(Debug)]
pub struct Catalog {
    email: Regex,
    phone: Regex,
    url: Regex,
    postal_code: Regex,
    person_name: Regex,
    places: Gazetteer,
}

static GLOBAL: Lazy<Catalog> = Lazy::new(Catalog::builtin);

impl Catalog {
    /// The process-wide catalog, compiled on first use
    pub fn global() -> &'static Catalog {
        &GLOBAL
    }

    /// Compile the builtin catalog
    ///
    /// Every source is a constant of this module, so compilation cannot fail
    /// for valid builds; the unit tests compile each one.
    pub fn builtin() -> Self {
        let person_name = person_name_pattern(&Gazetteer::new(SURNAMES), HONORIFICS);

        Self {
            email: compile(patterns::EMAIL),
            phone: compile(patterns::PHONE),
            url: compile(patterns::URL),
            postal_code: compile(patterns::POSTAL_CODE),
            person_name: compile(&person_name),
            places: Gazetteer::new(PLACES),
        }
    }

    /// Pattern used to scan for `category`
    pub fn pattern(&self, category: Category) -> PatternKind<'_> {
        match category {
            Category::Email => PatternKind::Regex(&self.email),
            Category::Phone => PatternKind::Regex(&self.phone),
            Category::Url => PatternKind::Regex(&self.url),
            Category::PostalCode => PatternKind::Regex(&self.postal_code),
            Category::PersonName => PatternKind::Regex(&self.person_name),
            Category::PlaceName => PatternKind::Gazetteer(&self.places),
        }
    }

    pub fn places(&self) -> &Gazetteer {
        &self.places
    }
}

/// Build the person-name regex: surname, given-name run, honorific
fn person_name_pattern(surnames: &Gazetteer, honorifics: &[&str]) -> String {
    let surname_alt: Vec<String> = surnames.entries().iter().map(|s| regex::escape(s)).collect();

    let mut honorifics: Vec<&str> = honorifics.to_vec();
    honorifics.sort_by_key(|h| std::cmp::Reverse(h.chars().count()));
    let honorific_alt: Vec<String> = honorifics.iter().map(|h| regex::escape(h)).collect();

    format!(
        "(?:{}){}+?(?:{})",
        surname_alt.join("|"),
        patterns::NAME_CONTINUATION,
        honorific_alt.join("|")
    )
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => panic!("builtin pattern {pattern:?} failed to compile: {e}"),
    }
}
