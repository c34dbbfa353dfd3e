use bson::{Bson, doc};
use bson::oid::ObjectId;
use filterlite::{FieldMapping, MappingTable, compile, fields_one_to_one, object_id_fields};

#[test]
fn fields_one_to_one_compile_directly() {
    let mut mapping: MappingTable<()> = fields_one_to_one(&["status", "role"]);
    mapping.insert("hidden".to_string(), FieldMapping::Disabled);

    let filters = doc! {"status": "ACTIVE", "role_ne": "ADMIN", "hidden": "x"};
    let result = compile(&(), Some(&filters), &mapping).unwrap();
    assert_eq!(result.conditions, doc! {"status": "ACTIVE", "role": {"$ne": "ADMIN"}});
}

#[test]
fn disabled_field_is_absent_from_output() {
    let mut mapping: MappingTable<()> = MappingTable::new();
    mapping.insert("c".to_string(), FieldMapping::Disabled);

    let filters = doc! {"a": "b", "c": "d"};
    let result = compile(&(), Some(&filters), &mapping).unwrap();
    assert_eq!(result.conditions, doc! {"a": "b"});
}

#[test]
fn renamed_key_can_target_a_nested_path() {
    let mut mapping: MappingTable<()> = MappingTable::new();
    mapping.insert("tags".to_string(), FieldMapping::renamed("my.nested.tags"));

    let filters = doc! {"tags_all": ["a", "b"]};
    let result = compile(&(), Some(&filters), &mapping).unwrap();
    assert_eq!(result.conditions, doc! {"my.nested.tags": {"$all": ["a", "b"]}});
}

#[test]
fn object_id_fields_parse_string_operands() {
    let mapping: MappingTable<()> = object_id_fields(&["userId"]);
    let id = ObjectId::new();

    let filters = doc! {"userId": id.to_hex()};
    let result = compile(&(), Some(&filters), &mapping).unwrap();
    assert_eq!(result.conditions.get("userId"), Some(&Bson::ObjectId(id)));
}

#[test]
fn object_id_fields_drop_unparseable_operands() {
    let mapping: MappingTable<()> = object_id_fields(&["userId"]);

    let filters = doc! {"userId": "not-an-object-id"};
    let result = compile(&(), Some(&filters), &mapping).unwrap();
    assert!(result.conditions.is_empty());
}

#[test]
fn object_id_fields_pass_existing_ids_through() {
    let mapping: MappingTable<()> = object_id_fields(&["userId"]);
    let id = ObjectId::new();

    let filters = doc! {"userId": id};
    let result = compile(&(), Some(&filters), &mapping).unwrap();
    assert_eq!(result.conditions.get("userId"), Some(&Bson::ObjectId(id)));
}

#[cfg(feature = "regex")]
mod search {
    use super::*;
    use filterlite::search_fields;

    #[test]
    fn search_builds_a_regex_or_over_fields() {
        let mut mapping: MappingTable<()> = MappingTable::new();
        mapping.insert("search".to_string(), search_fields(&["name", "author"]));

        let filters = doc! {"search": "tolkien"};
        let result = compile(&(), Some(&filters), &mapping).unwrap();
        assert_eq!(
            result.conditions,
            doc! {"$or": [
                {"name": {"$regex": "tolkien", "$options": "i"}},
                {"author": {"$regex": "tolkien", "$options": "i"}},
            ]}
        );
    }

    #[test]
    fn search_escapes_regex_metacharacters() {
        let mut mapping: MappingTable<()> = MappingTable::new();
        mapping.insert("search".to_string(), search_fields(&["name"]));

        let filters = doc! {"search": "c++ (draft)"};
        let result = compile(&(), Some(&filters), &mapping).unwrap();
        let clauses = result.conditions.get_array("$or").unwrap();
        let Bson::Document(clause) = &clauses[0] else { panic!("expected document clause") };
        let pattern = clause.get_document("name").unwrap().get_str("$regex").unwrap();
        assert_eq!(pattern, regex::escape("c++ (draft)"));
    }

    #[test]
    fn empty_search_term_compiles_to_no_constraint() {
        let mut mapping: MappingTable<()> = MappingTable::new();
        mapping.insert("search".to_string(), search_fields(&["name"]));

        let filters = doc! {"search": ""};
        let result = compile(&(), Some(&filters), &mapping).unwrap();
        assert!(result.conditions.is_empty());
    }
}
