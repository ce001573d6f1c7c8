//! # 범주형 값 매퍼
//!
//! 설문의 순서형 라벨을 숫자 순위(1–3)로 바꿉니다.
//!
//! | 라벨 | 순위 |
//! |------|------|
//! | Gering, Selten | 1 |
//! | Mittel | 2 |
//! | Stark, Oft | 3 |
//! | 그 외 (없음, 빈 값, 알 수 없는 라벨) | 0 |
//!
//! 부담 척도(Gering/Mittel/Stark)와 빈도 척도(Selten/Mittel/Oft)가 같은 1–3 범위를
//! 공유합니다. 어느 방향이 "좋은" 것인지는 순위가 아니라 `Direction`이 정합니다.

/// 라벨을 순위로 변환합니다. 대소문자와 앞뒤 공백은 무시합니다.
pub fn category_rank(label: Option<&str>) -> u8 {
    let Some(label) = label else {
        return 0;
    };

    match label.trim().to_lowercase().as_str() {
        "gering" | "selten" => 1,
        "mittel" => 2,
        "stark" | "oft" => 3,
        _ => 0,
    }
}

/// 순위를 화면 표시용 라벨로 되돌립니다.
///
/// 두 척도가 합쳐져 있으므로 손실이 있는 변환입니다 (1 → "Gering/Selten").
pub fn category_label(rank: u8) -> &'static str {
    match rank {
        1 => "Gering/Selten",
        2 => "Mittel",
        3 => "Stark/Oft",
        _ => "Keine Angabe",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_both_scales() {
        assert_eq!(category_rank(Some("Gering")), 1);
        assert_eq!(category_rank(Some("Selten")), 1);
        assert_eq!(category_rank(Some("Mittel")), 2);
        assert_eq!(category_rank(Some("Stark")), 3);
        assert_eq!(category_rank(Some("Oft")), 3);
    }

    #[test]
    fn ignores_case_and_whitespace() {
        assert_eq!(category_rank(Some("  sTaRk ")), 3);
        assert_eq!(category_rank(Some("\tmittel\n")), 2);
        // 반복 호출해도 같은 값
        assert_eq!(category_rank(Some(" OFT")), category_rank(Some("oft ")));
    }

    #[test]
    fn unknown_or_missing_labels_rank_zero() {
        assert_eq!(category_rank(None), 0);
        assert_eq!(category_rank(Some("")), 0);
        assert_eq!(category_rank(Some("   ")), 0);
        assert_eq!(category_rank(Some("Sehr stark")), 0);
        assert_eq!(category_rank(Some("#N/A")), 0);
    }

    #[test]
    fn labels_are_lossy_across_scales() {
        assert_eq!(category_label(category_rank(Some("Selten"))), "Gering/Selten");
        assert_eq!(category_label(2), "Mittel");
        assert_eq!(category_label(3), "Stark/Oft");
        assert_eq!(category_label(0), "Keine Angabe");
        assert_eq!(category_label(9), "Keine Angabe");
    }
}
