use memo_core::{
    Category, Memo, MemoService, MemoStore, SqliteMemoStore, CATEGORY_FILTER_ALL,
    CLEAR_ALL_SENTINEL,
};
use std::collections::HashSet;
use uuid::Uuid;

fn service() -> MemoService<SqliteMemoStore> {
    MemoService::new(SqliteMemoStore::open_in_memory().expect("in-memory store should open"))
}

fn memo(title: &str, content: &str, category: Category, tags: &[&str]) -> Memo {
    Memo::new(
        title,
        content,
        category,
        tags.iter().map(|tag| tag.to_string()).collect(),
    )
}

async fn create(service: &MemoService<SqliteMemoStore>, memo: Memo) -> Memo {
    service
        .create(&memo)
        .await
        .expect("valid memo should be created")
}

fn ids(memos: &[Memo]) -> HashSet<Uuid> {
    memos.iter().map(|memo| memo.id).collect()
}

#[tokio::test]
async fn create_then_get_returns_equal_memo_with_equal_timestamps() {
    let service = service();
    let draft = memo("Groceries", "Buy milk", Category::Personal, &["home", "food"]);

    let created = create(&service, draft.clone()).await;
    assert_eq!(created.id, draft.id);
    assert_eq!(created.title, "Groceries");
    assert_eq!(created.tags, vec!["home", "food"]);
    assert_eq!(created.created_at, created.updated_at);

    let loaded = service
        .get_by_id(draft.id)
        .await
        .expect("created memo should be readable");
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn update_advances_updated_at_and_preserves_identity() {
    let service = service();
    let created = create(&service, memo("Plan", "draft", Category::Work, &[])).await;

    let mut edited = created.clone();
    edited.content = "final".to_string();
    edited.category = Category::Study.code().to_string();
    edited.tags = vec!["q3".to_string()];
    let updated = service
        .update(&edited)
        .await
        .expect("existing memo should update");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert!(updated.is_edited());
    assert_eq!(updated.content, "final");
    assert_eq!(updated.category, "study");
    assert_eq!(updated.tags, vec!["q3"]);

    let again = service
        .update(&updated)
        .await
        .expect("second update should succeed");
    assert!(again.updated_at > updated.updated_at);
}

#[tokio::test]
async fn update_of_missing_memo_returns_none() {
    let service = service();
    let ghost = memo("ghost", "", Category::Other, &[]);
    assert_eq!(service.update(&ghost).await, None);
}

#[tokio::test]
async fn remove_then_get_is_none_and_missing_remove_still_succeeds() {
    let service = service();
    let created = create(&service, memo("Temp", "", Category::Other, &[])).await;

    assert!(service.remove(created.id).await);
    assert_eq!(service.get_by_id(created.id).await, None);
    assert!(service.remove(created.id).await);
    assert!(service.remove(Uuid::new_v4()).await);
}

#[tokio::test]
async fn list_all_is_newest_first() {
    let service = service();
    let first = create(&service, memo("first", "", Category::Idea, &[])).await;
    let second = create(&service, memo("second", "", Category::Idea, &[])).await;

    let all = service.list_all().await;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);
}

#[tokio::test]
async fn search_matches_title_content_and_tags_case_insensitively() {
    let service = service();
    let by_title = create(&service, memo("Milk run", "errands", Category::Personal, &[])).await;
    let by_content = create(&service, memo("Shopping", "buy MILK", Category::Personal, &[])).await;
    let by_tag = create(
        &service,
        memo("Dessert", "ice cream", Category::Idea, &["milkshake"]),
    )
    .await;
    let both = create(&service, memo("milk", "milk", Category::Idea, &["milk"])).await;
    create(&service, memo("Bread", "flour", Category::Other, &["bakery"])).await;

    let hits = service.search("mIlK").await;
    assert_eq!(hits.len(), 4);
    assert_eq!(
        ids(&hits),
        HashSet::from([by_title.id, by_content.id, by_tag.id, both.id])
    );
    for pair in hits.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    assert!(service.search("cheese").await.is_empty());
}

#[tokio::test]
async fn search_folds_case_beyond_ascii() {
    let service = service();
    let notes = create(
        &service,
        memo("Über Notizen", "Ärger mit Привет", Category::Personal, &[]),
    )
    .await;
    create(&service, memo("Plain", "ascii only", Category::Other, &[])).await;

    assert_eq!(ids(&service.search("über").await), HashSet::from([notes.id]));
    assert_eq!(ids(&service.search("ÜBER").await), HashSet::from([notes.id]));
    assert_eq!(ids(&service.search("ПРИВЕТ").await), HashSet::from([notes.id]));
    assert_eq!(ids(&service.search("ärger").await), HashSet::from([notes.id]));
}

#[tokio::test]
async fn store_text_search_folds_case_beyond_ascii() {
    let store = SqliteMemoStore::open_in_memory().expect("in-memory store should open");
    let service = MemoService::new(store);
    let created = service
        .create(&memo("ÉTUDE", "Привет", Category::Study, &["none"]))
        .await
        .expect("valid memo should be created");

    let rows = service
        .store()
        .search_text("étude")
        .await
        .expect("text search should run");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, created.id);

    let rows = service
        .store()
        .search_text("пРИВЕТ")
        .await
        .expect("text search should run");
    assert_eq!(rows.len(), 1);

    let rows = service
        .store()
        .search_text("none")
        .await
        .expect("text search should run");
    assert!(rows.is_empty(), "store text search never looks at tags");
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let service = service();
    let percent = create(&service, memo("100% done", "", Category::Work, &[])).await;
    create(&service, memo("100 done", "", Category::Work, &[])).await;

    let hits = service.search("0%").await;
    assert_eq!(ids(&hits), HashSet::from([percent.id]));

    assert!(service.search("_").await.is_empty());
}

#[tokio::test]
async fn blank_search_matches_everything() {
    let service = service();
    create(&service, memo("a", "", Category::Work, &[])).await;
    create(&service, memo("b", "", Category::Work, &[])).await;

    assert_eq!(service.search("").await.len(), 2);
}

#[tokio::test]
async fn category_filter_is_exact_and_all_equals_list_all() {
    let service = service();
    let work = create(&service, memo("standup", "", Category::Work, &[])).await;
    create(&service, memo("diary", "", Category::Personal, &[])).await;

    let filtered = service.list_by_category("work").await;
    assert_eq!(ids(&filtered), HashSet::from([work.id]));
    assert!(service.list_by_category("Work").await.is_empty());
    assert!(service.list_by_category("wor").await.is_empty());

    assert_eq!(
        service.list_by_category(CATEGORY_FILTER_ALL).await,
        service.list_all().await
    );
}

#[tokio::test]
async fn write_paths_reject_invalid_memos() {
    let service = service();

    let blank = memo("   ", "body", Category::Work, &[]);
    assert_eq!(service.create(&blank).await, None);

    let mut unknown = memo("ok", "body", Category::Work, &[]);
    unknown.category = "recipes".to_string();
    assert_eq!(service.create(&unknown).await, None);

    let reserved = Memo::with_id(CLEAR_ALL_SENTINEL, "nil", "", Category::Other, vec![]);
    assert_eq!(service.create(&reserved).await, None);

    let created = create(&service, memo("valid", "", Category::Work, &[])).await;
    let mut cleared_title = created.clone();
    cleared_title.title = String::new();
    assert_eq!(service.update(&cleared_title).await, None);
    assert_eq!(service.get_by_id(created.id).await, Some(created));

    assert_eq!(service.list_all().await.len(), 1);
}

#[tokio::test]
async fn duplicate_id_create_returns_none_and_keeps_original() {
    let service = service();
    let original = create(&service, memo("original", "", Category::Idea, &[])).await;

    let duplicate = Memo::with_id(original.id, "copy", "", Category::Idea, vec![]);
    assert_eq!(service.create(&duplicate).await, None);
    let loaded = service
        .get_by_id(original.id)
        .await
        .expect("original memo should remain");
    assert_eq!(loaded.title, "original");
}

#[tokio::test]
async fn clear_all_removes_every_memo() {
    let service = service();
    for title in ["one", "two", "three"] {
        create(&service, memo(title, "", Category::Other, &[])).await;
    }

    assert!(service.clear_all().await);
    assert!(service.list_all().await.is_empty());
    assert!(service.clear_all().await);
}

#[tokio::test]
async fn groceries_scenario() {
    let service = service();
    create(&service, memo("Older", "", Category::Work, &[])).await;
    let created = create(
        &service,
        memo("Groceries", "Buy milk", Category::Personal, &["home"]),
    )
    .await;

    assert_eq!(service.list_all().await[0].id, created.id);
    assert_eq!(ids(&service.search("milk").await), HashSet::from([created.id]));
    assert_eq!(ids(&service.search("MILK").await), HashSet::from([created.id]));

    let mut edited = created.clone();
    edited.content = "Buy milk and eggs".to_string();
    service
        .update(&edited)
        .await
        .expect("groceries memo should update");

    let loaded = service
        .get_by_id(created.id)
        .await
        .expect("updated memo should be readable");
    assert_eq!(loaded.content, "Buy milk and eggs");
    assert!(loaded.updated_at > created.updated_at);

    assert!(service.remove(created.id).await);
    assert!(!ids(&service.list_all().await).contains(&created.id));
}

#[tokio::test]
async fn boxed_store_behaves_like_concrete_store() {
    let store: Box<dyn MemoStore> =
        Box::new(SqliteMemoStore::open_in_memory().expect("in-memory store should open"));
    let service = MemoService::new(store);
    assert_eq!(service.store().backend(), "sqlite");

    let created = service
        .create(&memo("boxed", "", Category::Idea, &[]))
        .await
        .expect("valid memo should be created");
    assert_eq!(service.get_by_id(created.id).await, Some(created));
}

#[tokio::test]
async fn persisted_file_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("memo.db");

    let created = {
        let store = SqliteMemoStore::open(&path).expect("file store should open");
        MemoService::new(store)
            .create(&memo("durable", "body", Category::Study, &["a", "a"]))
            .await
            .expect("valid memo should be created")
    };

    let store = SqliteMemoStore::open(&path).expect("file store should reopen");
    let loaded = MemoService::new(store)
        .get_by_id(created.id)
        .await
        .expect("persisted memo should be readable");
    assert_eq!(loaded, created);
    assert_eq!(loaded.tags, vec!["a", "a"]);
}
