/// Test fixtures: realistic storefront titles and a seeded noisy-title generator
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use pricequery_lib::modules::query::QueryService;

pub const SITE_HINTS: &[&str] = &[
    "www.amazon.com.tr",
    "amazon.com.tr",
    "www.trendyol.com",
    "www.hepsiburada.com",
    "www.n11.com",
    "",
];

/// Titles as they appear on real listing pages
pub const STOREFRONT_TITLES: &[&str] = &[
    "Apple iPhone 15 (256 GB, Mavi) - Yeni Amazon.com.tr Özel",
    "Hepsiburada Süper Fiyat Telefon Kılıfı",
    "Trendyol Kargo Bedava Xiaomi Redmi Note 13 Pro 8 GB 256 GB Siyah",
    "Lenovo IdeaPad Slim 3 82XM00PVTX Intel Core i5-12450H 16 GB RAM 512 GB SSD 15.6\" FHD Dizüstü Bilgisayar",
    "Anker 65W USB-C Şarj Cihazı, GaN Teknolojisi [Yeni Model]",
    "Philips Airfryer XXL HD9650/90 Fritöz, 7.3 Lt, 2225 W, Siyah",
    "Logitech MX Master 3S Kablosuz Mouse 8000 DPI – Grafit",
    "Nivea Men Deep Nemlendirici Krem 75 ml ×3 Adet",
    "SAMSUNG 55\" 4K UHD Smart TV UE55CU7000UXTK 120 Hz",
    "Şık Çanta™ Kadın Omuz Çantası — İNDİRİMLİ ÜRÜN!!!",
];

const FRAGMENTS: &[&str] = &[
    "Apple", "iPhone", "15", "Pro", "Max", "256", "GB", "8", "gb", "usb", "c", "USB-C", "Type-C",
    "type", "82XM00PVTX", "SM-A546E", "Kılıf", "Şarj", "Çanta", "Öğrenci", "Ütü", "İNDİRİM",
    "Süper", "Fiyat", "Yeni", "Amazon.com.tr", "Özel", "Hepsiburada", "Trendyol", "Kargo",
    "Bedava", "(", ")", "[", "]", "-", "--", "/", "\"", "™", "®", "©", "×", "…", "&", ",",
    ".", "!", "x", "4", "350", "ml", "120", "Hz", "5000", "mAh", "6", "\u{00A0}", "\t", "ß",
    "Ω", "東京", "😀", "é", "ÿ", "ẞ", "İ", "ı", "_",
];

/// Deterministic generator of noisy titles
pub struct TitleGenerator {
    rng: StdRng,
}

impl TitleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn title(&mut self) -> String {
        let len = self.rng.gen_range(0..30);
        let mut title = String::new();
        for _ in 0..len {
            let fragment = FRAGMENTS.choose(&mut self.rng).copied().unwrap_or_default();
            title.push_str(fragment);
            if self.rng.gen_bool(0.8) {
                title.push(' ');
            }
        }
        title
    }

    pub fn site_hint(&mut self) -> &'static str {
        SITE_HINTS.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

pub fn default_service() -> QueryService {
    QueryService::with_defaults()
}

/// Whitelist of characters a query may contain
pub fn is_allowed_query_char(c: char) -> bool {
    c == ' '
        || c == '-'
        || c == '_'
        || c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || (matches!(c, '\u{00C0}'..='\u{017F}') && c.is_alphabetic() && !c.is_uppercase())
}
