//! Table schema definitions for the catalog CSV files

use super::types::*;

pub static IDOLS: TableSchema = TableSchema {
    kind: TableKind::Idols,
    name: "idols",
    source_file: "idol-list.csv",
    columns: &[
        Column::required("アイドル名", "card_name", ColumnType::Text),
        Column::new("名前", "name", ColumnType::Text),
        Column::required("スキル", "skill", ColumnType::Text),
        Column::required("秒数", "duration", ColumnType::Integer),
        Column::required("特化", "specialization", ColumnType::Text),
        Column::required("属性", "attribute", ColumnType::Text),
        Column::required("確率", "probability", ColumnType::Text),
        Column::required("Vo", "vocal", ColumnType::Integer),
        Column::required("Da", "dance", ColumnType::Integer),
        Column::required("Vi", "visual", ColumnType::Integer),
        Column::required("センター効果", "center_effect", ColumnType::Text),
        Column::new("副属性", "sub_attribute", ColumnType::Text),
        Column::new("ドミナント", "dominant", ColumnType::Text),
        Column::new("メモリアルガシャ", "gacha_url", ColumnType::Text),
        Column::new("特訓画像", "training_image_url", ColumnType::Text),
        Column::required("画像パス", "image_path", ColumnType::Text),
    ],
    indexes: &["skill"],
};

pub static SKILLS: TableSchema = TableSchema {
    kind: TableKind::Skills,
    name: "skills",
    source_file: "skill_info.csv",
    columns: &[
        Column::required("スキル", "skill", ColumnType::Text),
        Column::required("スキル詳細", "description", ColumnType::Text),
        Column::required("スキル分類", "categories", ColumnType::Text),
    ],
    indexes: &[],
};

pub static IDOL_NAMES: TableSchema = TableSchema {
    kind: TableKind::IdolNames,
    name: "idol_names",
    source_file: "idol_name.csv",
    columns: &[Column::required("名前", "name", ColumnType::Text)],
    indexes: &[],
};

pub static IDEAL_TEAMS: TableSchema = TableSchema {
    kind: TableKind::IdealTeams,
    name: "ideal_teams",
    source_file: "ideal_team.csv",
    columns: &[
        Column::required("編成名", "formation", ColumnType::Text),
        Column::required("対応楽曲", "song", ColumnType::Text),
        Column::required("スキル1", "skill_1", ColumnType::Text),
        Column::required("秒数1", "duration_1", ColumnType::Text),
        Column::required("特化1", "specialization_1", ColumnType::Text),
        Column::required("属性1", "attribute_1", ColumnType::Text),
        Column::required("スキル2", "skill_2", ColumnType::Text),
        Column::required("秒数2", "duration_2", ColumnType::Text),
        Column::required("特化2", "specialization_2", ColumnType::Text),
        Column::required("属性2", "attribute_2", ColumnType::Text),
        Column::required("スキル3", "skill_3", ColumnType::Text),
        Column::required("秒数3", "duration_3", ColumnType::Text),
        Column::required("特化3", "specialization_3", ColumnType::Text),
        Column::required("属性3", "attribute_3", ColumnType::Text),
        Column::required("スキル4", "skill_4", ColumnType::Text),
        Column::required("秒数4", "duration_4", ColumnType::Text),
        Column::required("特化4", "specialization_4", ColumnType::Text),
        Column::required("属性4", "attribute_4", ColumnType::Text),
        Column::required("スキル5", "skill_5", ColumnType::Text),
        Column::required("秒数5", "duration_5", ColumnType::Text),
        Column::required("特化5", "specialization_5", ColumnType::Text),
        Column::required("属性5", "attribute_5", ColumnType::Text),
        Column::required("ゲストスキル", "guest_skill", ColumnType::Text),
        Column::required("ゲスト秒数", "guest_duration", ColumnType::Text),
        Column::required("ゲスト特化", "guest_specialization", ColumnType::Text),
        Column::required("ゲスト属性", "guest_attribute", ColumnType::Text),
    ],
    indexes: &[],
};

/// All tables in load order
pub static ALL_TABLES: &[&TableSchema] = &[&IDOLS, &SKILLS, &IDOL_NAMES, &IDEAL_TEAMS];
