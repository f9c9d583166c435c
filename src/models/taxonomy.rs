//! The fixed lookup lists a destination points into.
//!
//! These never change at runtime. A destination whose foreign key isn't in
//! the matching list just doesn't resolve (see [`resolve`]).

/// A read-only reference list, like the set of categories.
pub trait Taxonomy: Sized + 'static {
    /// What to call this taxonomy in messages, like "category".
    const KIND: &'static str;

    /// Every entry, in declaration order.
    fn all() -> &'static [Self];

    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
}

/// Lists every entry of a taxonomy, in declaration order.
pub fn list<T: Taxonomy>() -> &'static [T] {
    T::all()
}

/// Finds the entry with the given id.
///
/// Legacy or malformed records can point at ids we don't know about, so
/// `None` is a totally normal answer here.
pub fn resolve<T: Taxonomy>(id: &str) -> Option<&'static T> {
    T::all().iter().find(|entry| entry.id() == id)
}

/// What kind of place this is, broadly. ("alam" = nature)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

impl Category {
    pub const ALAM: Self = Self::new("alam", "Alam");
    pub const SEJARAH: Self = Self::new("sejarah", "Sejarah");
    pub const KULINER: Self = Self::new("kuliner", "Kuliner");
    pub const RELIGI: Self = Self::new("religi", "Religi");
    pub const BUDAYA: Self = Self::new("budaya", "Budaya");

    const ALL: [Self; 5] = [
        Self::ALAM,
        Self::SEJARAH,
        Self::KULINER,
        Self::RELIGI,
        Self::BUDAYA,
    ];

    const fn new(id: &'static str, name: &'static str) -> Self {
        Self { id, name }
    }
}

impl Taxonomy for Category {
    const KIND: &'static str = "category";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// The physical kind of place: a beach, a mountain, a temple...
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PlaceType {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl PlaceType {
    pub const PANTAI: Self = Self::new("pantai", "Pantai", "Wisata pantai dan laut");
    pub const GUNUNG: Self = Self::new("gunung", "Gunung", "Wisata pegunungan");
    pub const DANAU: Self = Self::new("danau", "Danau", "Wisata danau");
    pub const AIR_TERJUN: Self = Self::new("air_terjun", "Air Terjun", "Wisata air terjun");
    pub const MUSEUM: Self = Self::new("museum", "Museum", "Wisata museum dan galeri");
    pub const CANDI: Self = Self::new("candi", "Candi", "Wisata candi dan situs bersejarah");
    pub const TAMAN: Self = Self::new("taman", "Taman", "Wisata taman dan kebun");

    const ALL: [Self; 7] = [
        Self::PANTAI,
        Self::GUNUNG,
        Self::DANAU,
        Self::AIR_TERJUN,
        Self::MUSEUM,
        Self::CANDI,
        Self::TAMAN,
    ];

    const fn new(id: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            id,
            name,
            description,
        }
    }
}

impl Taxonomy for PlaceType {
    const KIND: &'static str = "place type";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Province {
    pub id: &'static str,
    pub name: &'static str,
    /// A short code, like `JT` for Jawa Timur.
    #[serde(rename = "shortCode")]
    pub code: &'static str,
}

impl Province {
    pub const JAWA_TIMUR: Self = Self::new("jawa_timur", "Jawa Timur", "JT");
    pub const JAWA_TENGAH: Self = Self::new("jawa_tengah", "Jawa Tengah", "JTG");
    pub const JAWA_BARAT: Self = Self::new("jawa_barat", "Jawa Barat", "JB");
    pub const BALI: Self = Self::new("bali", "Bali", "BA");
    pub const NTT: Self = Self::new("ntt", "Nusa Tenggara Timur", "NTT");
    pub const NTB: Self = Self::new("ntb", "Nusa Tenggara Barat", "NTB");
    pub const SUMATERA_UTARA: Self = Self::new("sumatera_utara", "Sumatera Utara", "SU");
    pub const PAPUA_BARAT: Self = Self::new("papua_barat", "Papua Barat", "PB");
    pub const YOGYAKARTA: Self = Self::new("yogyakarta", "DI Yogyakarta", "DIY");
    pub const DKI_JAKARTA: Self = Self::new("dki_jakarta", "DKI Jakarta", "DKI");

    const ALL: [Self; 10] = [
        Self::JAWA_TIMUR,
        Self::JAWA_TENGAH,
        Self::JAWA_BARAT,
        Self::BALI,
        Self::NTT,
        Self::NTB,
        Self::SUMATERA_UTARA,
        Self::PAPUA_BARAT,
        Self::YOGYAKARTA,
        Self::DKI_JAKARTA,
    ];

    const fn new(id: &'static str, name: &'static str, code: &'static str) -> Self {
        Self { id, name, code }
    }
}

impl Taxonomy for Province {
    const KIND: &'static str = "province";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids_are_unique<T: Taxonomy>() {
        let ids: HashSet<_> = list::<T>().iter().map(|e| e.id()).collect();
        assert_eq!(ids.len(), list::<T>().len(), "{} ids", T::KIND);
    }

    #[test]
    fn every_taxonomy_has_unique_ids() {
        ids_are_unique::<Category>();
        ids_are_unique::<PlaceType>();
        ids_are_unique::<Province>();
    }

    #[test]
    fn lists_keep_declaration_order() {
        let names: Vec<_> = list::<Category>().iter().map(|c| c.name).collect();
        assert_eq!(names, ["Alam", "Sejarah", "Kuliner", "Religi", "Budaya"]);

        assert_eq!(list::<PlaceType>().first(), Some(&PlaceType::PANTAI));
        assert_eq!(list::<Province>().last(), Some(&Province::DKI_JAKARTA));

        // restartable
        assert_eq!(list::<Province>(), list::<Province>());
    }

    #[test]
    fn resolves_known_ids() {
        assert_eq!(resolve::<Category>("budaya"), Some(&Category::BUDAYA));
        assert_eq!(resolve::<PlaceType>("air_terjun"), Some(&PlaceType::AIR_TERJUN));
        assert_eq!(resolve::<Province>("yogyakarta").map(|p| p.code), Some("DIY"));
    }

    #[test]
    fn wire_shapes() {
        let jt = serde_json::to_value(Province::JAWA_TIMUR).unwrap();
        assert_eq!(
            jt,
            serde_json::json!({ "id": "jawa_timur", "name": "Jawa Timur", "shortCode": "JT" })
        );

        let pantai = serde_json::to_value(PlaceType::PANTAI).unwrap();
        assert_eq!(pantai["description"], "Wisata pantai dan laut");
        assert_eq!(serde_json::to_value(Category::ALAM).unwrap()["name"], "Alam");
    }

    #[test]
    fn unknown_ids_resolve_to_nothing() {
        assert_eq!(resolve::<Category>("Alam"), None, "ids are case-sensitive");
        assert_eq!(resolve::<PlaceType>(""), None);
        assert_eq!(resolve::<Province>("atlantis"), None);
    }
}
