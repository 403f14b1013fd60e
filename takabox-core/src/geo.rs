use serde::Serialize;

// ============================================================================
// Bangladesh delivery geography
// ============================================================================
//
// Districts and thanas are static reference data: the delivery form offers
// them as pick lists and the delivery-charge split keys off the Dhaka
// district. Names carry both Bangla and English spellings because the
// storefront filter matches against either.

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct District {
    pub id: &'static str,
    pub name: &'static str,
    pub name_en: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Thana {
    pub id: &'static str,
    pub district_id: &'static str,
    pub name: &'static str,
    pub name_en: &'static str,
}

/// The capital-region district id. Deliveries inside it use the metro rate.
pub const DHAKA_DISTRICT_ID: &str = "dhaka";

const DISTRICTS: &[District] = &[
    District { id: "dhaka", name: "ঢাকা", name_en: "Dhaka" },
    District { id: "chattogram", name: "চট্টগ্রাম", name_en: "Chattogram" },
    District { id: "khulna", name: "খুলনা", name_en: "Khulna" },
    District { id: "rajshahi", name: "রাজশাহী", name_en: "Rajshahi" },
    District { id: "sylhet", name: "সিলেট", name_en: "Sylhet" },
    District { id: "barishal", name: "বরিশাল", name_en: "Barishal" },
    District { id: "rangpur", name: "রংপুর", name_en: "Rangpur" },
    District { id: "mymensingh", name: "ময়মনসিংহ", name_en: "Mymensingh" },
    District { id: "cumilla", name: "কুমিল্লা", name_en: "Cumilla" },
    District { id: "gazipur", name: "গাজীপুর", name_en: "Gazipur" },
    District { id: "narayanganj", name: "নারায়ণগঞ্জ", name_en: "Narayanganj" },
    District { id: "coxsbazar", name: "কক্সবাজার", name_en: "Cox's Bazar" },
];

const THANAS: &[Thana] = &[
    // Dhaka metro
    Thana { id: "dhanmondi", district_id: "dhaka", name: "ধানমন্ডি", name_en: "Dhanmondi" },
    Thana { id: "gulshan", district_id: "dhaka", name: "গুলশান", name_en: "Gulshan" },
    Thana { id: "mirpur", district_id: "dhaka", name: "মিরপুর", name_en: "Mirpur" },
    Thana { id: "uttara", district_id: "dhaka", name: "উত্তরা", name_en: "Uttara" },
    Thana { id: "mohammadpur", district_id: "dhaka", name: "মোহাম্মদপুর", name_en: "Mohammadpur" },
    Thana { id: "motijheel", district_id: "dhaka", name: "মতিঝিল", name_en: "Motijheel" },
    Thana { id: "tejgaon", district_id: "dhaka", name: "তেজগাঁও", name_en: "Tejgaon" },
    Thana { id: "badda", district_id: "dhaka", name: "বাড্ডা", name_en: "Badda" },
    // Chattogram
    Thana { id: "kotwali-ctg", district_id: "chattogram", name: "কোতোয়ালী", name_en: "Kotwali" },
    Thana { id: "pahartali", district_id: "chattogram", name: "পাহাড়তলী", name_en: "Pahartali" },
    Thana { id: "panchlaish", district_id: "chattogram", name: "পাঁচলাইশ", name_en: "Panchlaish" },
    Thana { id: "halishahar", district_id: "chattogram", name: "হালিশহর", name_en: "Halishahar" },
    Thana { id: "patenga", district_id: "chattogram", name: "পতেঙ্গা", name_en: "Patenga" },
    // Khulna
    Thana { id: "khalishpur", district_id: "khulna", name: "খালিশপুর", name_en: "Khalishpur" },
    Thana { id: "sonadanga", district_id: "khulna", name: "সোনাডাঙ্গা", name_en: "Sonadanga" },
    Thana { id: "daulatpur", district_id: "khulna", name: "দৌলতপুর", name_en: "Daulatpur" },
    // Rajshahi
    Thana { id: "boalia", district_id: "rajshahi", name: "বোয়ালিয়া", name_en: "Boalia" },
    Thana { id: "motihar", district_id: "rajshahi", name: "মতিহার", name_en: "Motihar" },
    Thana { id: "rajpara", district_id: "rajshahi", name: "রাজপাড়া", name_en: "Rajpara" },
    // Sylhet
    Thana { id: "kotwali-syl", district_id: "sylhet", name: "কোতোয়ালী", name_en: "Kotwali" },
    Thana { id: "jalalabad", district_id: "sylhet", name: "জালালাবাদ", name_en: "Jalalabad" },
    Thana { id: "beanibazar", district_id: "sylhet", name: "বিয়ানীবাজার", name_en: "Beanibazar" },
    // Barishal
    Thana { id: "kotwali-bar", district_id: "barishal", name: "কোতোয়ালী", name_en: "Kotwali" },
    Thana { id: "banaripara", district_id: "barishal", name: "বানারীপাড়া", name_en: "Banaripara" },
    // Rangpur
    Thana { id: "kotwali-rang", district_id: "rangpur", name: "কোতোয়ালী", name_en: "Kotwali" },
    Thana { id: "mithapukur", district_id: "rangpur", name: "মিঠাপুকুর", name_en: "Mithapukur" },
    // Mymensingh
    Thana { id: "kotwali-mym", district_id: "mymensingh", name: "কোতোয়ালী", name_en: "Kotwali" },
    Thana { id: "trishal", district_id: "mymensingh", name: "ত্রিশাল", name_en: "Trishal" },
    // Cumilla
    Thana { id: "kotwali-cum", district_id: "cumilla", name: "কোতোয়ালী", name_en: "Kotwali" },
    Thana { id: "daudkandi", district_id: "cumilla", name: "দাউদকান্দি", name_en: "Daudkandi" },
    // Gazipur
    Thana { id: "tongi", district_id: "gazipur", name: "টঙ্গী", name_en: "Tongi" },
    Thana { id: "sreepur", district_id: "gazipur", name: "শ্রীপুর", name_en: "Sreepur" },
    // Narayanganj
    Thana { id: "fatullah", district_id: "narayanganj", name: "ফতুল্লা", name_en: "Fatullah" },
    Thana { id: "sonargaon", district_id: "narayanganj", name: "সোনারগাঁও", name_en: "Sonargaon" },
    // Cox's Bazar
    Thana { id: "teknaf", district_id: "coxsbazar", name: "টেকনাফ", name_en: "Teknaf" },
    Thana { id: "ukhiya", district_id: "coxsbazar", name: "উখিয়া", name_en: "Ukhiya" },
];

pub fn districts() -> &'static [District] {
    DISTRICTS
}

pub fn district_by_id(id: &str) -> Option<&'static District> {
    DISTRICTS.iter().find(|d| d.id == id)
}

pub fn thanas_by_district(district_id: &str) -> Vec<&'static Thana> {
    THANAS.iter().filter(|t| t.district_id == district_id).collect()
}

pub fn thana_by_id(id: &str) -> Option<&'static Thana> {
    THANAS.iter().find(|t| t.id == id)
}

/// Whether a district is in the capital region (different delivery rate tier).
pub fn is_dhaka_district(district_id: &str) -> bool {
    district_id == DHAKA_DISTRICT_ID
}
