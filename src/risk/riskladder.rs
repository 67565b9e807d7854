/// Risk ladder 的一列：某一個曲線點往下 bump 1bp 後的 PV 變化。
#[derive(Debug, Clone, PartialEq)]
pub struct RiskLadderEntry {
    tenor_label: String,
    index_name: String,
    pv01: f64
}

impl RiskLadderEntry {
    pub fn new(tenor_label: String, index_name: String, pv01: f64) -> RiskLadderEntry {
        RiskLadderEntry {
            tenor_label,
            index_name,
            pv01
        }
    }

    pub fn tenor_label(&self) -> &str {
        &self.tenor_label
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn pv01(&self) -> f64 {
        self.pv01
    }
}

/// 依 index 篩選與加總 ladder。
pub trait RiskLadder {
    fn entries_for<'a>(&'a self, index_name: &'a str) -> impl Iterator<Item = &'a RiskLadderEntry>;

    fn total_pv01(&self, index_name: &str) -> f64 {
        self.entries_for(index_name).map(RiskLadderEntry::pv01).sum()
    }
}

impl RiskLadder for [RiskLadderEntry] {
    fn entries_for<'a>(&'a self, index_name: &'a str) -> impl Iterator<Item = &'a RiskLadderEntry> {
        self.iter().filter(move |entry| entry.index_name == index_name)
    }
}
