mod common;

use catalog_dal::{Error, SearchInput, SearchOrder, UnitOfWork};
use catalog_types::Category;
use common::{category_at, init_db, insert_categories, session};
use rand::seq::SliceRandom as _;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[tokio::test]
async fn test_insert_and_get() {
    let pool = init_db().await;
    let category = category_at("Movies", 1_000);

    let mut uow = session(&pool).await;
    uow.categories().insert(&category).await.unwrap();
    uow.commit().await.unwrap();

    let mut uow = session(&pool).await;
    let loaded = uow.categories().get(category.id()).await.unwrap();
    assert_eq!(loaded, category);
}

#[tokio::test]
async fn test_get_missing() {
    let pool = init_db().await;
    let id = Uuid::new_v4();
    let mut uow = session(&pool).await;
    let err = uow.categories().get(id).await.unwrap_err();
    assert!(matches!(err, Error::RecordNotFound(_)));
    assert_eq!(err.to_string(), format!("Category '{id}' not found."));
}

#[tokio::test]
async fn test_update() {
    let pool = init_db().await;
    let mut category = category_at("Series", 1_000);
    let mut uow = session(&pool).await;
    uow.categories().insert(&category).await.unwrap();

    category
        .update("TV Shows", Some("Episodic content".to_string()))
        .unwrap();
    category.deactivate();
    uow.categories().update(&category).await.unwrap();
    uow.commit().await.unwrap();

    let mut uow = session(&pool).await;
    let loaded = uow.categories().get(category.id()).await.unwrap();
    assert_eq!(loaded.name(), "TV Shows");
    assert_eq!(loaded.description(), "Episodic content");
    assert!(!loaded.is_active());
    assert_eq!(loaded.created_at(), category.created_at());
}

#[tokio::test]
async fn test_update_and_delete_missing() {
    let pool = init_db().await;
    let category = category_at("Ghost", 1_000);
    let mut uow = session(&pool).await;
    let err = uow.categories().update(&category).await.unwrap_err();
    assert!(matches!(err, Error::RecordNotFound(_)));
    let err = uow.categories().delete(&category).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Category '{}' not found.", category.id())
    );
}

#[tokio::test]
async fn test_delete() {
    let pool = init_db().await;
    let categories = insert_categories(&pool, &["Movies", "Series"]).await;

    let mut uow = session(&pool).await;
    uow.categories().delete(&categories[0]).await.unwrap();
    uow.commit().await.unwrap();

    let mut uow = session(&pool).await;
    assert!(uow.categories().get(categories[0].id()).await.is_err());
    assert!(uow.categories().get(categories[1].id()).await.is_ok());
}

#[tokio::test]
async fn test_uncommitted_work_is_rolled_back() {
    let pool = init_db().await;
    let category = category_at("Documentaries", 1_000);
    {
        let mut uow = session(&pool).await;
        uow.categories().insert(&category).await.unwrap();
    }

    let mut uow = session(&pool).await;
    uow.categories().insert(&category_at("Shorts", 1_000)).await.unwrap();
    uow.rollback().await.unwrap();

    let mut uow = session(&pool).await;
    let all = uow.categories().search(&SearchInput::default()).await.unwrap();
    assert_eq!(all.total, 0);
    assert!(all.items.is_empty());
}

#[tokio::test]
async fn test_cancelled_session() {
    let pool = init_db().await;
    let cancel = CancellationToken::new();
    cancel.cancel();
    let res = UnitOfWork::begin(&pool, cancel).await;
    assert!(matches!(res, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_cancelled_query() {
    let pool = init_db().await;
    let cancel = CancellationToken::new();
    let mut uow = UnitOfWork::begin(&pool, cancel.clone()).await.unwrap();
    cancel.cancel();
    let res = uow.categories().insert(&category_at("Movies", 1)).await;
    assert!(matches!(res, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_search_default_order_and_filter() {
    let pool = init_db().await;
    insert_categories(&pool, &["Horror", "Action", "Horror - Robots", "Drama"]).await;

    let mut uow = session(&pool).await;
    let all = uow.categories().search(&SearchInput::default()).await.unwrap();
    assert_eq!(all.total, 4);
    assert_eq!(all.current_page, 1);
    assert_eq!(all.per_page, 15);
    let names: Vec<_> = all.items.iter().map(Category::name).collect();
    assert_eq!(names, ["Action", "Drama", "Horror", "Horror - Robots"]);

    let found = uow
        .categories()
        .search(&SearchInput::default().with_search("horror"))
        .await
        .unwrap();
    assert_eq!(found.total, 2);
    let names: Vec<_> = found.items.iter().map(Category::name).collect();
    assert_eq!(names, ["Horror", "Horror - Robots"]);
}

#[tokio::test]
async fn test_search_wildcards_are_literal() {
    let pool = init_db().await;
    insert_categories(&pool, &["100% Fun", "1000 Fun", "Under_score", "Underscore"]).await;

    let mut uow = session(&pool).await;
    let found = uow
        .categories()
        .search(&SearchInput::default().with_search("0%"))
        .await
        .unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].name(), "100% Fun");

    let found = uow
        .categories()
        .search(&SearchInput::default().with_search("r_s"))
        .await
        .unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].name(), "Under_score");
}

#[tokio::test]
async fn test_search_ignores_case_beyond_ascii() {
    let pool = init_db().await;
    let categories = insert_categories(&pool, &["Ação", "Ficção Científica", "Action"]).await;

    let mut uow = session(&pool).await;
    for (search, expected) in [
        ("AÇÃO", vec!["Ação"]),
        ("ação", vec!["Ação"]),
        ("FICÇÃO", vec!["Ficção Científica"]),
        ("científica", vec!["Ficção Científica"]),
        ("ACTION", vec!["Action"]),
        ("ÇÃ", vec!["Ação", "Ficção Científica"]),
    ] {
        let found = uow
            .categories()
            .search(&SearchInput::default().with_search(search))
            .await
            .unwrap();
        let names: Vec<_> = found.items.iter().map(Category::name).collect();
        assert_eq!(names, expected, "search {search:?}");
        assert_eq!(found.total, expected.len() as u64);
    }

    let mut renamed = categories[2].clone();
    renamed.update("ÉPICO", None).unwrap();
    uow.categories().update(&renamed).await.unwrap();
    let found = uow
        .categories()
        .search(&SearchInput::default().with_search("épico"))
        .await
        .unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].id(), renamed.id());
    let found = uow
        .categories()
        .search(&SearchInput::default().with_search("action"))
        .await
        .unwrap();
    assert_eq!(found.total, 0);
}

#[tokio::test]
async fn test_search_ordering() {
    let pool = init_db().await;
    let categories = vec![
        category_at("Bravo", 30),
        category_at("Alpha", 20),
        category_at("Charlie", 10),
    ];
    let mut uow = session(&pool).await;
    for category in &categories {
        uow.categories().insert(category).await.unwrap();
    }
    uow.commit().await.unwrap();

    let mut uow = session(&pool).await;
    let names = |output: catalog_dal::SearchOutput<Category>| {
        output
            .items
            .iter()
            .map(|c| c.name().to_string())
            .collect::<Vec<_>>()
    };

    let by_name_desc = uow
        .categories()
        .search(&SearchInput::default().with_order("NAME", SearchOrder::Desc))
        .await
        .unwrap();
    assert_eq!(names(by_name_desc), ["Charlie", "Bravo", "Alpha"]);

    let by_created = uow
        .categories()
        .search(&SearchInput::default().with_order("createdAt", SearchOrder::Asc))
        .await
        .unwrap();
    assert_eq!(names(by_created), ["Charlie", "Alpha", "Bravo"]);

    let by_created_desc = uow
        .categories()
        .search(&SearchInput::default().with_order("createdat", SearchOrder::Desc))
        .await
        .unwrap();
    assert_eq!(names(by_created_desc), ["Bravo", "Alpha", "Charlie"]);

    let unknown_key = uow
        .categories()
        .search(&SearchInput::default().with_order("rating", SearchOrder::Desc))
        .await
        .unwrap();
    assert_eq!(names(unknown_key), ["Alpha", "Bravo", "Charlie"]);

    let mut ids: Vec<Uuid> = categories.iter().map(Category::id).collect();
    ids.sort();
    let by_id = uow
        .categories()
        .search(&SearchInput::default().with_order("id", SearchOrder::Asc))
        .await
        .unwrap();
    let found: Vec<Uuid> = by_id.items.iter().map(Category::id).collect();
    assert_eq!(found, ids);
}

#[tokio::test]
async fn test_same_names_are_ordered_by_id() {
    let pool = init_db().await;
    let categories = insert_categories(&pool, &["Same", "Same", "Same", "Other"]).await;
    let mut same_ids: Vec<Uuid> = categories
        .iter()
        .filter(|c| c.name() == "Same")
        .map(Category::id)
        .collect();
    same_ids.sort();

    let mut uow = session(&pool).await;
    for _ in 0..3 {
        let page = uow
            .categories()
            .search(&SearchInput::new(1, 15, "Same", "name", SearchOrder::Asc))
            .await
            .unwrap();
        let ids: Vec<Uuid> = page.items.iter().map(Category::id).collect();
        assert_eq!(ids, same_ids);
    }

    let page = uow
        .categories()
        .search(&SearchInput::new(1, 15, "Same", "name", SearchOrder::Desc))
        .await
        .unwrap();
    let ids: Vec<Uuid> = page.items.iter().map(Category::id).collect();
    same_ids.reverse();
    assert_eq!(ids, same_ids);
}

#[tokio::test]
async fn test_pagination() {
    let pool = init_db().await;
    let mut names: Vec<String> = (0..23).map(|i| format!("Category {i:02}")).collect();
    names.shuffle(&mut rand::rng());
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    insert_categories(&pool, &refs).await;
    names.sort();

    let mut uow = session(&pool).await;
    for per_page in [1u32, 4, 10, 23, 50] {
        let mut collected = Vec::new();
        let last_page = 23u32.div_ceil(per_page) + 1;
        for page in 1..=last_page {
            let output = uow
                .categories()
                .search(&SearchInput::new(page, per_page, "", "", SearchOrder::Asc))
                .await
                .unwrap();
            assert_eq!(output.total, 23);
            assert_eq!(output.current_page, page);
            assert_eq!(output.per_page, per_page);
            let skipped = i64::from(page - 1) * i64::from(per_page);
            let expected = (23 - skipped).clamp(0, i64::from(per_page)) as usize;
            assert_eq!(output.items.len(), expected);
            collected.extend(output.items.iter().map(|c| c.name().to_string()));
        }
        assert_eq!(collected, names);
    }
}

#[tokio::test]
async fn test_page_beyond_last() {
    let pool = init_db().await;
    insert_categories(&pool, &["Movies", "Series", "Shorts"]).await;

    let mut uow = session(&pool).await;
    let output = uow
        .categories()
        .search(&SearchInput::new(5, 2, "", "", SearchOrder::Asc))
        .await
        .unwrap();
    assert_eq!(output.total, 3);
    assert!(output.items.is_empty());
}

#[tokio::test]
async fn test_lists_by_ids() {
    let pool = init_db().await;
    let categories = insert_categories(&pool, &["Movies", "Series", "Shorts"]).await;
    let unknown = Uuid::new_v4();

    let mut uow = session(&pool).await;
    let requested = [categories[2].id(), unknown, categories[0].id()];
    let found = uow.categories().get_list_by_ids(&requested).await.unwrap();
    let names: Vec<_> = found.iter().map(Category::name).collect();
    assert_eq!(names, ["Movies", "Shorts"]);

    let mut ids = uow
        .categories()
        .get_ids_list_by_ids(&requested)
        .await
        .unwrap();
    ids.sort();
    let mut expected = vec![categories[2].id(), categories[0].id()];
    expected.sort();
    assert_eq!(ids, expected);

    assert!(uow.categories().get_list_by_ids(&[]).await.unwrap().is_empty());
    assert!(uow
        .categories()
        .get_ids_list_by_ids(&[])
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_lists_by_many_ids() {
    let pool = init_db().await;
    let categories = insert_categories(&pool, &["Movies", "Series"]).await;

    let mut requested: Vec<Uuid> = (0..40_000).map(|_| Uuid::new_v4()).collect();
    requested.push(categories[1].id());
    requested.insert(777, categories[0].id());

    let mut uow = session(&pool).await;
    let mut ids = uow
        .categories()
        .get_ids_list_by_ids(&requested)
        .await
        .unwrap();
    ids.sort();
    let mut expected = vec![categories[0].id(), categories[1].id()];
    expected.sort();
    assert_eq!(ids, expected);

    let found = uow.categories().get_list_by_ids(&requested).await.unwrap();
    let names: Vec<_> = found.iter().map(Category::name).collect();
    assert_eq!(names, ["Movies", "Series"]);
}
