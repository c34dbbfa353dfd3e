use bson::doc;
use filterlite::{Order, SortSpec, build_sort_document};

#[test]
fn single_descending_entry() {
    let specs = vec![SortSpec { field: "createdAt".to_string(), order: Order::Desc }];
    assert_eq!(build_sort_document(&specs), doc! {"createdAt": -1});
}

#[test]
fn multiple_entries_keep_their_order() {
    let specs = vec![
        SortSpec { field: "score".to_string(), order: Order::Desc },
        SortSpec { field: "createdAt".to_string(), order: Order::Asc },
    ];
    assert_eq!(build_sort_document(&specs), doc! {"score": -1, "createdAt": 1});
}

#[test]
fn last_duplicate_field_wins() {
    let specs = vec![
        SortSpec { field: "createdAt".to_string(), order: Order::Asc },
        SortSpec { field: "createdAt".to_string(), order: Order::Desc },
    ];
    let sort = build_sort_document(&specs);
    assert_eq!(sort.len(), 1);
    assert_eq!(sort.get_i32("createdAt").unwrap(), -1);
}

#[test]
fn empty_input_builds_an_empty_document() {
    assert!(build_sort_document(&[]).is_empty());
}
