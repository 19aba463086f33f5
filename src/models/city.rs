use serde::{Deserialize, Serialize};

use crate::source::normalize_city;

/// A Turkish province. `id` is the licence plate number, `code` its two-digit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub code: String,
}

const PROVINCES: [&str; 81] = [
    "Adana",
    "Adıyaman",
    "Afyonkarahisar",
    "Ağrı",
    "Amasya",
    "Ankara",
    "Antalya",
    "Artvin",
    "Aydın",
    "Balıkesir",
    "Bilecik",
    "Bingöl",
    "Bitlis",
    "Bolu",
    "Burdur",
    "Bursa",
    "Çanakkale",
    "Çankırı",
    "Çorum",
    "Denizli",
    "Diyarbakır",
    "Edirne",
    "Elazığ",
    "Erzincan",
    "Erzurum",
    "Eskişehir",
    "Gaziantep",
    "Giresun",
    "Gümüşhane",
    "Hakkari",
    "Hatay",
    "Isparta",
    "Mersin",
    "İstanbul",
    "İzmir",
    "Kars",
    "Kastamonu",
    "Kayseri",
    "Kırklareli",
    "Kırşehir",
    "Kocaeli",
    "Konya",
    "Kütahya",
    "Malatya",
    "Manisa",
    "Kahramanmaraş",
    "Mardin",
    "Muğla",
    "Muş",
    "Nevşehir",
    "Niğde",
    "Ordu",
    "Rize",
    "Sakarya",
    "Samsun",
    "Siirt",
    "Sinop",
    "Sivas",
    "Tekirdağ",
    "Tokat",
    "Trabzon",
    "Tunceli",
    "Şanlıurfa",
    "Uşak",
    "Van",
    "Yozgat",
    "Zonguldak",
    "Aksaray",
    "Bayburt",
    "Karaman",
    "Kırıkkale",
    "Batman",
    "Şırnak",
    "Bartın",
    "Ardahan",
    "Iğdır",
    "Yalova",
    "Karabük",
    "Kilis",
    "Osmaniye",
    "Düzce",
];

pub const DEFAULT_CITY_ID: i64 = 6;

pub fn all() -> Vec<City> {
    PROVINCES
        .iter()
        .enumerate()
        .map(|(i, name)| City {
            id: i as i64 + 1,
            name: name.to_string(),
            code: format!("{:02}", i + 1),
        })
        .collect()
}

/// Unknown ids fall back to the first city.
pub fn by_id(id: i64) -> City {
    let cities = all();
    let idx = cities.iter().position(|c| c.id == id).unwrap_or(0);
    cities[idx].clone()
}

/// Resolve a user argument: a plate number or a city name in any casing.
pub fn find(query: &str) -> Option<City> {
    if let Ok(id) = query.trim().parse::<i64>() {
        return all().into_iter().find(|c| c.id == id);
    }
    let wanted = normalize_city(query);
    all().into_iter().find(|c| normalize_city(&c.name) == wanted)
}

pub fn search(term: &str) -> Vec<City> {
    if term.trim().is_empty() {
        return all();
    }
    let needle = normalize_city(term);
    all()
        .into_iter()
        .filter(|c| normalize_city(&c.name).contains(&needle))
        .collect()
}

/// Step through the catalogue, wrapping at both ends.
pub fn cycle(current_id: i64, step: i64) -> City {
    let len = PROVINCES.len() as i64;
    let next = (current_id - 1 + step).rem_euclid(len) + 1;
    by_id(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_plate_numbers() {
        assert_eq!(by_id(6).name, "Ankara");
        assert_eq!(by_id(34).name, "İstanbul");
        assert_eq!(by_id(81).code, "81");
        assert_eq!(by_id(1).code, "01");
    }

    #[test]
    fn unknown_id_falls_back_to_first() {
        assert_eq!(by_id(999).name, "Adana");
    }

    #[test]
    fn find_accepts_names_and_plates() {
        assert_eq!(find("istanbul").map(|c| c.id), Some(34));
        assert_eq!(find("ŞANLIURFA").map(|c| c.id), Some(63));
        assert_eq!(find("35").map(|c| c.name), Some("İzmir".to_string()));
        assert!(find("Atlantis").is_none());
    }

    #[test]
    fn search_filters_by_substring() {
        let hits: Vec<i64> = search("kır").iter().map(|c| c.id).collect();
        assert!(hits.contains(&39));
        assert!(hits.contains(&40));
        assert!(hits.contains(&71));
        assert_eq!(search("").len(), 81);
    }

    #[test]
    fn cycle_wraps() {
        assert_eq!(cycle(81, 1).id, 1);
        assert_eq!(cycle(1, -1).id, 81);
        assert_eq!(cycle(6, 1).id, 7);
    }
}
