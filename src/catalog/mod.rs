/// Built-in reference data: the selectable city list and the dua collection.
use crate::domain::{City, Dua};

/// The fixed city catalog. Entry 0 (Cairo) is the default selection.
pub fn cities() -> Vec<City> {
    CITY_ROWS
        .iter()
        .map(|&(id, name, latitude, longitude)| City {
            id: id.to_string(),
            name: name.to_string(),
            latitude,
            longitude,
            country: "Egypt".to_string(),
            country_code: "EG".to_string(),
        })
        .collect()
}

/// Look up a catalog city by id.
pub fn city_by_id(id: &str) -> Option<City> {
    cities().into_iter().find(|c| c.id == id)
}

/// The default selection at startup.
pub fn default_city() -> City {
    cities().remove(0)
}

const CITY_ROWS: [(&str, &str, f64, f64); 15] = [
    ("1", "Cairo", 30.0444, 31.2357),
    ("2", "Alexandria", 31.2001, 29.9187),
    ("3", "Giza", 30.0131, 31.2089),
    ("4", "Shubra El-Kheima", 30.1286, 31.2422),
    ("5", "Port Said", 31.2565, 32.2841),
    ("6", "Suez", 29.9668, 32.5498),
    ("7", "Luxor", 25.6872, 32.6396),
    ("8", "Aswan", 24.0889, 32.8998),
    ("9", "Asyut", 27.1783, 31.1859),
    ("10", "Ismailia", 30.5965, 32.2715),
    ("11", "Faiyum", 29.3084, 30.8428),
    ("12", "Zagazig", 30.5833, 31.5167),
    ("13", "Damietta", 31.4175, 31.8144),
    ("14", "Assiut", 27.1783, 31.1859),
    ("15", "Tanta", 30.7865, 31.0004),
];

/// The built-in supplication list.
pub fn duas() -> Vec<Dua> {
    vec![
        Dua {
            id: 1,
            title: "Morning Remembrance",
            arabic_text: "اللَّهُمَّ بِكَ أَصْبَحْنَا، وَبِكَ أَمْسَيْنَا، وَبِكَ نَحْيَا، وَبِكَ نَمُوتُ، وَإِلَيْكَ النُّشُورُ",
            translation: "O Allah, by You we enter the morning and by You we enter the evening, by You we live and by You we die, and to You is the resurrection.",
            transliteration: "Allāhumma bika aṣbaḥnā, wa bika amsaynā, wa bika naḥyā, wa bika namūtu, wa ilayka an-nushūr",
        },
        Dua {
            id: 2,
            title: "Evening Remembrance",
            arabic_text: "اللَّهُمَّ بِكَ أَمْسَيْنَا، وَبِكَ أَصْبَحْنَا، وَبِكَ نَحْيَا، وَبِكَ نَمُوتُ، وَإِلَيْكَ الْمَصِيرُ",
            translation: "O Allah, by You we enter the evening and by You we enter the morning, by You we live and by You we die, and to You is the final return.",
            transliteration: "Allāhumma bika amsaynā, wa bika aṣbaḥnā, wa bika naḥyā, wa bika namūtu, wa ilayka al-maṣīr",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_fifteen_cities_with_unique_ids() {
        let cities = cities();
        assert_eq!(cities.len(), 15);
        let mut ids: Vec<&str> = cities.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn default_city_is_cairo() {
        let city = default_city();
        assert_eq!(city.id, "1");
        assert_eq!(city.name, "Cairo");
        assert_eq!(city.country_code, "EG");
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(city_by_id("7").unwrap().name, "Luxor");
        assert!(city_by_id("99").is_none());
    }
}
