//! # Seed Catalog
//!
//! Built-in sample books the catalog starts from.
//!
//! The catalog is not part of the durable key contract, so it is seeded in
//! memory at every startup. Identifiers are fixed so that review keys
//! (`reviews_<bookId>`) written in one run still resolve in the next.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use seojae_core::{Book, Category, Money};

fn added(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0)
        .single()
        .expect("valid seed timestamp")
}

fn published(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

/// The sample catalog, in the order the shelf was stocked.
#[rustfmt::skip]
pub fn sample_books() -> Vec<Book> {
    let book = |id: &str, title: &str, author: &str, publisher: &str, price: i64,
                stock: i64, category: Category, description: &str, isbn: &str,
                publish_date: NaiveDate, image: &str, created_at: DateTime<Utc>| Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        publisher: publisher.to_string(),
        price: Money::from_won(price),
        stock,
        category,
        description: description.to_string(),
        isbn: isbn.to_string(),
        publish_date,
        image: image.to_string(),
        created_at,
    };

    vec![
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e01", "채식주의자", "한강", "창비",
             13_500, 12, Category::Novel,
             "평범했던 아내가 어느 날 육식을 거부하면서 벌어지는 일을 그린 연작소설.",
             "9788936433598", published(2007, 10, 30), "covers/vegetarian.jpg",
             added(2024, 10, 2)),
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e02", "아몬드", "손원평", "창비",
             12_600, 3, Category::Novel,
             "감정을 느끼지 못하는 소년 윤재의 특별한 성장 이야기.",
             "9788936434267", published(2017, 3, 31), "covers/almond.jpg",
             added(2024, 10, 9)),
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e03", "달러구트 꿈 백화점", "이미예", "팩토리나인",
             13_800, 7, Category::Novel,
             "잠들어야만 입장할 수 있는 꿈 백화점에서 벌어지는 이야기.",
             "9791165341909", published(2020, 7, 8), "covers/dallergut.jpg",
             added(2024, 10, 16)),
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e04", "보통의 언어들", "김이나", "위즈덤하우스",
             13_800, 5, Category::Essay,
             "작사가 김이나가 일상의 단어들을 자기만의 언어로 풀어낸 에세이.",
             "9791190630603", published(2020, 5, 20), "covers/ordinary-words.jpg",
             added(2024, 10, 23)),
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e05", "언어의 온도", "이기주", "말글터",
             13_800, 0, Category::Essay,
             "말과 글에 담긴 온기를 살피는 짧은 글들.",
             "9791195522125", published(2016, 8, 19), "covers/temperature.jpg",
             added(2024, 11, 1)),
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e06", "미움받을 용기", "기시미 이치로", "인플루엔셜",
             14_900, 9, Category::SelfHelp,
             "아들러 심리학을 대화 형식으로 풀어낸 베스트셀러.",
             "9788996991342", published(2014, 11, 17), "covers/courage.jpg",
             added(2024, 11, 8)),
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e07", "아주 작은 습관의 힘", "제임스 클리어", "비즈니스북스",
             16_800, 2, Category::SelfHelp,
             "매일 1%의 변화가 만드는 복리의 성장에 대하여.",
             "9791162540640", published(2019, 2, 26), "covers/atomic-habits.jpg",
             added(2024, 11, 15)),
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e08", "부의 추월차선", "엠제이 드마코", "토트",
             16_800, 6, Category::Business,
             "서행차선을 벗어나 부를 앞당기는 방법을 말하는 책.",
             "9788994418339", published(2013, 8, 20), "covers/fastlane.jpg",
             added(2024, 11, 22)),
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e09", "코스모스", "칼 세이건", "사이언스북스",
             19_800, 4, Category::Science,
             "우주와 인간을 잇는 과학 교양의 고전.",
             "9788983711892", published(2006, 12, 20), "covers/cosmos.jpg",
             added(2024, 12, 1)),
        book("5e9d1a0e-8f1b-4c62-9d3e-0a1b2c3d4e10", "러스트 프로그래밍 공식 가이드", "스티브 클라바닉", "제이펍",
             38_000, 8, Category::Tech,
             "러스트 언어를 처음부터 끝까지 다루는 공식 안내서.",
             "9791188621958", published(2019, 5, 20), "covers/rust-book.jpg",
             added(2024, 12, 10)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique_and_stable() {
        let books = sample_books();
        let mut ids: Vec<String> = books.iter().map(|b| b.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), books.len());

        // Stable across calls, so persisted review keys keep resolving
        assert_eq!(sample_books()[0].id, books[0].id);
    }

    #[test]
    fn test_seed_covers_every_category() {
        let books = sample_books();
        for category in Category::ALL {
            assert!(
                books.iter().any(|b| b.category == category),
                "no seed book in {:?}",
                category
            );
        }
    }

    #[test]
    fn test_seed_added_dates_ascend() {
        let books = sample_books();
        assert!(books.windows(2).all(|w| w[0].created_at < w[1].created_at));
    }
}
