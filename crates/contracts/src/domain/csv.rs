use serde::{Deserialize, Serialize};

/// Статус проверки строки загруженного файла
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    /// Проверка ещё идёт
    Pending,
    Valid,
    Invalid,
}

/// Кандидат из одной непустой строки файла. Живёт только пока открыт
/// диалог импорта.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvCandidate {
    /// Позиция среди непустых строк, начиная с 1
    pub line_no: usize,
    /// Номер заказа без ведущего '#'
    pub order_number: String,
    pub validity: Validity,
    /// Причина отклонения (пустая, пока кандидат Pending или Valid)
    pub reason: String,
}

/// Разбирает текст файла на кандидатов: строки режутся по переводам
/// строк, обрезаются, пустые выбрасываются, один ведущий '#' снимается.
/// Дубликаты внутри файла здесь не отсеиваются.
pub fn parse_candidates(text: &str) -> Vec<CsvCandidate> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(idx, line)| CsvCandidate {
            line_no: idx + 1,
            order_number: line.strip_prefix('#').unwrap_or(line).to_string(),
            validity: Validity::Pending,
            reason: String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_hash_and_empty_lines() {
        let candidates = parse_candidates("#1001\n1002\n\n1001");
        let numbers: Vec<&str> = candidates.iter().map(|c| c.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["1001", "1002", "1001"]);
        assert!(candidates.iter().all(|c| c.validity == Validity::Pending));
    }

    #[test]
    fn test_parse_handles_crlf_and_whitespace() {
        let candidates = parse_candidates("  #1001 \r\n\t\r\n 1002\r\n");
        let numbers: Vec<&str> = candidates.iter().map(|c| c.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["1001", "1002"]);
    }

    #[test]
    fn test_only_one_leading_hash_is_stripped() {
        let candidates = parse_candidates("##1001");
        assert_eq!(candidates[0].order_number, "#1001");
    }

    #[test]
    fn test_line_numbers_are_one_based_over_kept_lines() {
        let candidates = parse_candidates("a\n\nb");
        assert_eq!(candidates[0].line_no, 1);
        assert_eq!(candidates[1].line_no, 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_candidates("").is_empty());
        assert!(parse_candidates("\n \n\t\n").is_empty());
    }
}
