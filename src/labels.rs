// 🌐 Labels - static UI text per language

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Chinese,
    #[default]
    English,
    Lao,
    Thai,
}

/// One entry per piece of UI text. Templates use `{n}` for a count.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub pool_total: &'static str,
    pub filtered_remaining: &'static str,
    pub clear_history: &'static str,
    pub history_cleared: &'static str,
    pub no_available: &'static str,
    pub first_digit_filter: &'static str,
    pub first_digit_filter_label: &'static str,
    pub big_small_filter: &'static str,
    pub big_small_label: &'static str,
    pub odd_even_label: &'static str,
    pub filtered_count: &'static str,
    pub no_filtered: &'static str,
    pub all_numbers: &'static str,
    pub generate_count_label: &'static str,
    pub generate_button: &'static str,
    pub selection_title: &'static str,
    pub history_saved: &'static str,
}

impl Labels {
    /// Fill the `{n}` placeholder of a count template
    pub fn count(template: &str, n: usize) -> String {
        template.replace("{n}", &n.to_string())
    }

    /// Warning text for the two "no candidates" outcomes
    pub fn no_candidates(&self, err: &Error) -> Option<&'static str> {
        match err {
            Error::EmptyAfterHistoryOrSequentialFilter => Some(self.no_available),
            Error::EmptyAfterAttributeFilter => Some(self.no_filtered),
            _ => None,
        }
    }
}

static CHINESE: Labels = Labels {
    title: "五位数号码推荐",
    pool_total: "号码池总数：{n} 组",
    filtered_remaining: "过滤顺序后剩余：{n} 组",
    clear_history: "清空历史记录",
    history_cleared: "历史记录已清空，请刷新页面",
    no_available: "没有可选号码！",
    first_digit_filter: "首位数字筛选（可多选）",
    first_digit_filter_label: "选择首位数字",
    big_small_filter: "首位数字大小单双筛选",
    big_small_label: "大小",
    odd_even_label: "单双",
    filtered_count: "筛选后剩余：{n} 组",
    no_filtered: "筛选后没有可选号码！",
    all_numbers: "所有可选号码",
    generate_count_label: "生成多少注号码",
    generate_button: "生成推荐号码",
    selection_title: "推荐号码：",
    history_saved: "已保存到历史记录",
};

static ENGLISH: Labels = Labels {
    title: "5-Digit Number Recommendation",
    pool_total: "Total pool: {n} numbers",
    filtered_remaining: "After filtering sequential numbers: {n} numbers",
    clear_history: "Clear history",
    history_cleared: "History cleared, please refresh",
    no_available: "No available numbers!",
    first_digit_filter: "First Digit Filter (Multiple select)",
    first_digit_filter_label: "Select first digit",
    big_small_filter: "First Digit Big/Small & Odd/Even Filter",
    big_small_label: "Big/Small",
    odd_even_label: "Odd/Even",
    filtered_count: "After filtering: {n} numbers",
    no_filtered: "No numbers available after filtering!",
    all_numbers: "All available numbers",
    generate_count_label: "How many numbers to generate",
    generate_button: "Generate recommended numbers",
    selection_title: "Recommended numbers:",
    history_saved: "Saved to history",
};

// Lao and Thai have no "saved" text of their own; English is used.
static LAO: Labels = Labels {
    title: "ແນະນຳຕົວເລກ 5 ໂຕ",
    pool_total: "ຈຳນວນຕົວເລກໃນຖານ: {n}",
    filtered_remaining: "ຫຼັງການກອງຕົວຕໍ່ຊ້ຳ: {n}",
    clear_history: "ລ້າງປະຫວັດ",
    history_cleared: "ປະຫວັດຖືກລ້າງແລ້ວ, ກະລຸນາປັບໃໝ່",
    no_available: "ບໍ່ມີຕົວເລກທີ່ເລືອກໄດ້!",
    first_digit_filter: "ການກອງຕົວເລກຫຼັກແລກ (ເລືອກໄດ້ຫຼາຍຕົວ)",
    first_digit_filter_label: "ເລືອກຕົວເລກຫຼັກ",
    big_small_filter: "ການກອງຕົວເລກຫຼັກ ໃຫຍ່/ນ້ອຍ & ຄີ/ຄິດ",
    big_small_label: "ໃຫຍ່/ນ້ອຍ",
    odd_even_label: "ຄີ/ຄິດ",
    filtered_count: "ຫຼັງການກອງ: {n} ຕົວ",
    no_filtered: "ຫຼັງການກອງບໍ່ມີຕົວເລກ!",
    all_numbers: "ຕົວເລກທີ່ເລືອກໄດ້ທັງໝົດ",
    generate_count_label: "ຈຳນວນທີ່ຈະສ້າງ",
    generate_button: "ສ້າງຕົວເລກແນະນຳ",
    selection_title: "ຕົວເລກແນະນຳ:",
    history_saved: "Saved to history",
};

static THAI: Labels = Labels {
    title: "แนะนำเลข 5 หลัก",
    pool_total: "จำนวนเลขทั้งหมด: {n}",
    filtered_remaining: "หลังกรองลำดับตัวเลข: {n}",
    clear_history: "ล้างประวัติ",
    history_cleared: "ล้างประวัติเรียบร้อยแล้ว กรุณารีเฟรช",
    no_available: "ไม่มีตัวเลขให้เลือก!",
    first_digit_filter: "กรองเลขหลักแรก (เลือกหลายตัวได้)",
    first_digit_filter_label: "เลือกเลขหลักแรก",
    big_small_filter: "กรองเลขหลักแรก ขนาด / คี่-คู่",
    big_small_label: "ใหญ่/เล็ก",
    odd_even_label: "คี่/คู่",
    filtered_count: "หลังกรอง: {n} ตัว",
    no_filtered: "ไม่มีตัวเลขหลังกรอง!",
    all_numbers: "ตัวเลขทั้งหมดที่สามารถเลือกได้",
    generate_count_label: "จำนวนตัวเลขที่ต้องการสร้าง",
    generate_button: "สร้างตัวเลขแนะนำ",
    selection_title: "ตัวเลขแนะนำ:",
    history_saved: "Saved to history",
};

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Chinese,
        Language::English,
        Language::Lao,
        Language::Thai,
    ];

    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::Chinese => &CHINESE,
            Language::English => &ENGLISH,
            Language::Lao => &LAO,
            Language::Thai => &THAI,
        }
    }

    /// Native name, as shown in the language selector
    pub fn name(&self) -> &'static str {
        match self {
            Language::Chinese => "中文",
            Language::English => "English",
            Language::Lao => "ລາວ",
            Language::Thai => "ไทย",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Language::Chinese => Language::English,
            Language::English => Language::Lao,
            Language::Lao => Language::Thai,
            Language::Thai => Language::Chinese,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "chinese" | "中文" => Ok(Language::Chinese),
            "en" | "english" => Ok(Language::English),
            "lo" | "lao" | "ລາວ" => Ok(Language::Lao),
            "th" | "thai" | "ไทย" => Ok(Language::Thai),
            other => Err(Error::UnknownLanguage(other.to_string())),
        }
    }
}
