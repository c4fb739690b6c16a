// Query operations - List, Show, Tags

use crate::cli::{Context, ListArgs, ListFormat, ShowArgs};
use crate::core::operations::ContactOperations;
use crate::core::pagination::PageSize;
use crate::core::query::{ContactQuery, SortField, SortOrder};
use crate::core::state::ViewMode;
use crate::core::traits::ContactDisplay;
use crate::utils::error::{AppError, AppResult, FlowResult, handle_flow};

pub fn handle_list_command(ctx: Context, args: &ListArgs) -> AppResult<()> {
    let manager = ContactOperations::new(ctx.config).with_data_file(ctx.data_file);
    let collection = manager.load_collection()?;
    let query = list_query(manager.default_query(), args)?;
    tracing::debug!(?query, "running list query");

    let page = query.run(&collection.contacts);
    let format = args.format.clone().unwrap_or(match manager.config().general.view {
        ViewMode::Grid => ListFormat::Grid,
        ViewMode::List => ListFormat::Table,
    });
    manager.format_page(&page, &format)
}

/// Layer the command line over the configured defaults
fn list_query(mut query: ContactQuery, args: &ListArgs) -> AppResult<ContactQuery> {
    if let Some(term) = &args.query {
        query.search = term.clone();
    }
    query.tag = args.tag.clone().filter(|t| !t.is_empty());
    if let Some(field) = &args.sort {
        query.sort_field = SortField::from_name(field);
    }
    if args.desc {
        query.sort_order = SortOrder::Desc;
    }
    if let Some(size) = args.page_size {
        query.page_size = PageSize::from_option(size)?;
    }
    query.page = args.page;
    Ok(query)
}

pub fn handle_show_command(ctx: Context, args: &ShowArgs) -> AppResult<()> {
    let manager = ContactOperations::new(ctx.config).with_data_file(ctx.data_file);

    match manager.find_contact(&args.identifier) {
        Ok(contact) => manager.print_contact(&contact),
        Err(AppError::NotFound {
            item_type,
            search_term,
        }) => {
            handle_flow(FlowResult::NotFound {
                item_type,
                search_term,
            });
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub fn handle_tags_command(ctx: Context) -> AppResult<()> {
    let manager = ContactOperations::new(ctx.config).with_data_file(ctx.data_file);
    let tags = manager.tag_counts()?;
    manager.print_tags(&tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::Contact;

    fn args() -> ListArgs {
        ListArgs {
            query: None,
            tag: None,
            sort: None,
            desc: false,
            page: 1,
            page_size: None,
            format: None,
        }
    }

    #[test]
    fn flags_override_configured_defaults() {
        let base = ContactQuery {
            sort_field: SortField::Address,
            ..Default::default()
        };
        let query = list_query(
            base,
            &ListArgs {
                query: Some("ann".to_string()),
                tag: Some("Job".to_string()),
                sort: Some("relation".to_string()),
                desc: true,
                page: 3,
                page_size: Some(50),
                ..args()
            },
        )
        .unwrap();

        assert_eq!(query.search, "ann");
        assert_eq!(query.tag.as_deref(), Some("Job"));
        assert_eq!(query.sort_field, SortField::Relation);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size.get(), 50);
    }

    #[test]
    fn unset_flags_keep_defaults() {
        let base = ContactQuery {
            sort_field: SortField::Email,
            ..Default::default()
        };
        let query = list_query(base.clone(), &args()).unwrap();
        assert_eq!(query, base);
    }

    #[test]
    fn page_zero_is_an_empty_page_not_an_error() {
        let query = list_query(ContactQuery::default(), &ListArgs { page: 0, ..args() }).unwrap();
        assert_eq!(query.page, 0);

        let contacts = vec![Contact {
            id: "a".to_string(),
            name: "Ann".to_string(),
            phone: "1".to_string(),
            email: String::new(),
            address: String::new(),
            relation: None,
            tags: vec![],
        }];
        let page = query.run(&contacts);
        assert!(page.contacts.is_empty());
        assert_eq!(page.total_matches, 1);
    }

    #[test]
    fn rejects_unsupported_page_size() {
        assert!(
            list_query(
                ContactQuery::default(),
                &ListArgs {
                    page_size: Some(7),
                    ..args()
                }
            )
            .is_err()
        );
    }
}
