// ==========================================
// 出货格口产线分配 - 自然排序
// ==========================================
// 规则: 数字串按数值比较，其余字符忽略大小写
// 字符类别: 空白 < 标点 < 数字 < 字母
// ==========================================

use std::cmp::Ordering;
use std::collections::HashSet;
use std::iter::Peekable;
use std::str::Chars;

/// 自然顺序比较（"A2" < "A10"，大小写不敏感）
///
/// 主比较相等时按原始字符串比较，保证结果确定
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    primary_cmp(a, b).then_with(|| a.cmp(b))
}

/// 去重 + 自然排序（丢弃空串）
pub fn unique_sorted<I>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let distinct: HashSet<String> = codes.into_iter().filter(|c| !c.is_empty()).collect();
    let mut sorted: Vec<String> = distinct.into_iter().collect();
    sorted.sort_by(|a, b| natural_cmp(a, b));
    sorted
}

fn primary_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let da = take_digits(&mut left);
                let db = take_digits(&mut right);
                let ord = cmp_digit_runs(&da, &db);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(ca), Some(cb)) => {
                let ord = char_key(ca).cmp(&char_key(cb));
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn char_key(c: char) -> (u8, char) {
    let class = if c.is_whitespace() {
        0
    } else if c.is_ascii_digit() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}
