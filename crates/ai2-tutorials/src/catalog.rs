/// The tutorial catalog: an immutable list of records and the categories
/// derived from them.
///
/// Built once at startup (from the built-in list or a JSON file) and shared
/// read-only for the lifetime of the process.
use std::collections::HashSet;
use std::path::Path;

use crate::error::AppError;
use crate::model::{Difficulty, TutorialRecord};

/// Number of tutorials featured on the landing view.
pub const FEATURED_COUNT: usize = 4;

/// Unique category labels in order of first appearance in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    labels: Vec<String>,
}

impl CategorySet {
    pub fn from_records(records: &[TutorialRecord]) -> Self {
        let mut seen = HashSet::new();
        let labels = records
            .iter()
            .filter(|r| seen.insert(r.category.as_str()))
            .map(|r| r.category.clone())
            .collect();
        Self { labels }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<TutorialRecord>,
    categories: CategorySet,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate ids.
    pub fn new(records: Vec<TutorialRecord>) -> Result<Self, AppError> {
        let mut ids = HashSet::new();
        for record in &records {
            if record.id.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "tutorial with empty id: {:?}",
                    record.title
                )));
            }
            if !ids.insert(record.id.as_str()) {
                return Err(AppError::Catalog(format!(
                    "duplicate tutorial id: {}",
                    record.id
                )));
            }
        }
        let categories = CategorySet::from_records(&records);
        Ok(Self {
            records,
            categories,
        })
    }

    /// Load a catalog from a JSON array of tutorial records.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let records: Vec<TutorialRecord> = tutor_common::json_file::read(path)?;
        Self::new(records)
    }

    /// The curated App Inventor 2 tutorial list shipped with the server.
    pub fn builtin() -> Self {
        let records = builtin_records();
        let categories = CategorySet::from_records(&records);
        Self {
            records,
            categories,
        }
    }

    pub fn records(&self) -> &[TutorialRecord] {
        &self.records
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&TutorialRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn featured(&self) -> &[TutorialRecord] {
        &self.records[..self.records.len().min(FEATURED_COUNT)]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count_in_category(&self, category: &str) -> usize {
        self.records.iter().filter(|r| r.category == category).count()
    }

    pub fn count_with_difficulty(&self, difficulty: Difficulty) -> usize {
        self.records
            .iter()
            .filter(|r| r.difficulty == difficulty)
            .count()
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    title: &str,
    description: &str,
    youtube_id: &str,
    difficulty: Difficulty,
    category: &str,
    duration: &str,
    tags: &[&str],
) -> TutorialRecord {
    TutorialRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        youtube_id: youtube_id.to_string(),
        difficulty,
        category: category.to_string(),
        duration: duration.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

// Video IDs are placeholders until the curated links are finalized.
fn builtin_records() -> Vec<TutorialRecord> {
    vec![
        record(
            "b1",
            "Hello Purr：你的第一個 App",
            "透過製作經典的「Hello Purr (貓叫聲)」App 來學習 App Inventor 的基本介面。了解設計檢視 (Designer) 與程式方塊 (Blocks) 的使用。",
            "5-Hw7HqA_cM",
            Difficulty::Beginner,
            "基礎",
            "12:30",
            &["按鈕", "音效", "圖片", "介面設計"],
        ),
        record(
            "b2",
            "跟我說話：文字轉語音",
            "製作一個會朗讀你輸入文字的 App。介紹文字轉語音 (TextToSpeech) 元件與事件處理 (Event Handling) 的基礎。",
            "e2k2t2",
            Difficulty::Beginner,
            "基礎",
            "08:45",
            &["文字轉語音", "文字方塊", "事件處理"],
        ),
        record(
            "b3",
            "彈跳球遊戲",
            "製作一個簡單的遊戲，讓球在牆壁間彈跳。學習畫布 (Canvas)、球形精靈 (Ball Sprite) 以及座標系統的概念。",
            "ad3d3d",
            Difficulty::Beginner,
            "遊戲",
            "15:20",
            &["畫布", "精靈", "動畫", "計時器"],
        ),
        record(
            "i1",
            "數位塗鴉：繪圖 App",
            "將手機變成畫板。學習處理觸控事件（拖曳 Drag、按壓 TouchDown）以及改變畫筆顏色。",
            "dd44dd",
            Difficulty::Intermediate,
            "圖形",
            "18:10",
            &["畫布", "顏色", "繪圖", "相機"],
        ),
        record(
            "i2",
            "待辦事項清單 (TinyDB)",
            "製作一個可儲存資料的任務清單。學習如何使用微型資料庫 (TinyDB) 將資料儲存在手機端，讓 App 重啟後資料依然存在。",
            "db55db",
            Difficulty::Intermediate,
            "資料",
            "22:00",
            &["微型資料庫", "清單顯示器", "資料持久化", "清單"],
        ),
        record(
            "i3",
            "GPS 位置追蹤器",
            "使用位置感測器 (LocationSensor) 取得經緯度並顯示地址。介紹 GPS 與權限設定。",
            "gps66",
            Difficulty::Intermediate,
            "感測器",
            "14:50",
            &["位置感測器", "地圖", "GPS"],
        ),
        record(
            "a1",
            "Web API：天氣 App",
            "使用網路 (Web) 元件與 JSON 解析，從網路上抓取即時天氣資料。",
            "api77",
            Difficulty::Advanced,
            "連接",
            "25:30",
            &["網路", "API", "JSON", "字典"],
        ),
        record(
            "a2",
            "藍牙聊天室",
            "建立一個可透過藍牙在兩台裝置間傳送訊息的聊天 App。進階的連接處理與清單選擇器應用。",
            "bt88",
            Difficulty::Advanced,
            "物聯網",
            "30:00",
            &["藍牙客戶端", "清單選擇器", "網路通訊"],
        ),
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal record for tests elsewhere in the crate.
    pub(crate) fn sample(
        id: &str,
        difficulty: Difficulty,
        category: &str,
        description: &str,
    ) -> TutorialRecord {
        record(
            id,
            &format!("Tutorial {id}"),
            description,
            &format!("yt-{id}"),
            difficulty,
            category,
            "10:00",
            &[],
        )
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.records().to_vec()).expect("builtin ids are unique");
        assert_eq!(rebuilt.len(), 8);
        assert_eq!(builtin.categories(), rebuilt.categories());
    }

    #[test]
    fn categories_are_unique_in_first_appearance_order() {
        let catalog = Catalog::builtin();
        let labels: Vec<&str> = catalog.categories().iter().collect();
        assert_eq!(
            labels,
            vec!["基礎", "遊戲", "圖形", "資料", "感測器", "連接", "物聯網"]
        );
        assert!(catalog.categories().contains("基礎"));
        assert!(!catalog.categories().contains("All"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let records = vec![
            sample("x", Difficulty::Beginner, "基礎", ""),
            sample("x", Difficulty::Advanced, "連接", ""),
        ];
        assert!(matches!(Catalog::new(records), Err(AppError::Catalog(_))));
    }

    #[test]
    fn rejects_empty_ids() {
        let records = vec![sample("  ", Difficulty::Beginner, "基礎", "")];
        assert!(matches!(Catalog::new(records), Err(AppError::Catalog(_))));
    }

    #[test]
    fn lookup_and_counts() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("a1").map(|r| r.title.as_str()), Some("Web API：天氣 App"));
        assert!(catalog.get("zz").is_none());
        assert_eq!(catalog.count_in_category("基礎"), 2);
        assert_eq!(catalog.count_with_difficulty(Difficulty::Intermediate), 3);
        let featured: Vec<&str> = catalog.featured().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(featured, vec!["b1", "b2", "b3", "i1"]);
    }

    #[test]
    fn featured_is_bounded_by_catalog_size() {
        let catalog = Catalog::new(vec![sample("only", Difficulty::Beginner, "基礎", "")]).unwrap();
        assert_eq!(catalog.featured().len(), 1);
    }

    #[test]
    fn loads_catalog_from_json_file() {
        let path = std::env::temp_dir().join(format!("ai2-catalog-{}.json", std::process::id()));
        let records = vec![sample("c1", Difficulty::Advanced, "連接", "weather")];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
        let catalog = Catalog::from_file(&path);
        std::fs::remove_file(&path).ok();
        let catalog = catalog.expect("catalog loads");
        assert_eq!(catalog.records(), records.as_slice());
    }
}
