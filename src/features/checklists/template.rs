//! Fixed 13-line equipment checklist every site is inspected against.

/// Read-only part of a checklist row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistTemplateEntry {
    pub nomor: i32,
    pub material: &'static str,
    pub spesifikasi: &'static str,
}

pub const CHECKLIST_LEN: usize = 13;

pub static CHECKLIST_TEMPLATE: [ChecklistTemplateEntry; CHECKLIST_LEN] = [
    entry(1, "Busbar", "Upper, Lower, Middle"),
    entry(2, "Cadwel di tiap kaki tower", ""),
    entry(3, "Lampu", "OBL, Taman, Penerangan BTS"),
    entry(4, "Box KWH", ""),
    entry(5, "Box ACPDL", ""),
    entry(6, "Box ABL", ""),
    entry(7, "Tangga naik tower", ""),
    entry(8, "Horizontal Tray", ""),
    entry(9, "Tower", ""),
    entry(10, "Grounding", ""),
    entry(11, "Jumlah Shelter", ""),
    entry(12, "Menara yang digunakan", ""),
    entry(13, "Self Spotting, Microcel, Kamuflase", ""),
];

const fn entry(
    nomor: i32,
    material: &'static str,
    spesifikasi: &'static str,
) -> ChecklistTemplateEntry {
    ChecklistTemplateEntry {
        nomor,
        material,
        spesifikasi,
    }
}
