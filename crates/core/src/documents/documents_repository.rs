use crate::db::{get_connection, WriteHandle};
use crate::documents::documents_model::{Document, NewDocument, SearchSource};
use crate::documents::documents_traits::DocumentRepositoryTrait;
use crate::errors::{Error, Result};
use crate::schema::documents;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct DocumentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl DocumentRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        DocumentRepository { pool, writer }
    }
}

#[async_trait]
impl DocumentRepositoryTrait for DocumentRepository {
    fn get_documents(&self, source: SearchSource, user_id: Option<&str>) -> Result<Vec<Document>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = documents::table.into_boxed();
        query = match (source, user_id) {
            (SearchSource::Kb, _) => query.filter(documents::user_id.is_null()),
            (SearchSource::User, Some(uid)) => query.filter(documents::user_id.eq(uid.to_string())),
            (SearchSource::All, Some(uid)) => query.filter(
                documents::user_id
                    .is_null()
                    .or(documents::user_id.eq(uid.to_string())),
            ),
            // Private sources without an identity never reach the repository,
            // the service rejects them first
            (_, None) => query.filter(documents::user_id.is_null()),
        };

        Ok(query
            .order(documents::created_at.asc())
            .load::<Document>(&mut conn)?)
    }

    fn get_user_documents(&self, user_id: &str) -> Result<Vec<Document>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(documents::table
            .filter(documents::user_id.eq(user_id))
            .order(documents::created_at.desc())
            .load::<Document>(&mut conn)?)
    }

    async fn create_document(&self, new_document: NewDocument) -> Result<Document> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Document> {
                let mut document = new_document;
                if document.id.is_none() {
                    document.id = Some(format!(
                        "doc_{}",
                        &Uuid::new_v4().to_string().replace('-', "")[..12]
                    ));
                }

                diesel::insert_into(documents::table)
                    .values(&document)
                    .execute(conn)?;

                Ok(documents::table
                    .find(document.id.unwrap())
                    .first::<Document>(conn)?)
            })
            .await
    }

    async fn delete_document(&self, user_id: &str, id: &str) -> Result<usize> {
        let user_owned = user_id.to_string();
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let existing: Option<Document> = documents::table
                    .find(&id_owned)
                    .first::<Document>(conn)
                    .optional()?;

                match existing {
                    None => Err(Error::NotFound(format!("document {}", id_owned))),
                    Some(doc) if doc.user_id.as_deref() != Some(user_owned.as_str()) => {
                        Err(Error::Unauthorized(format!("document {}", id_owned)))
                    }
                    Some(_) => {
                        Ok(diesel::delete(documents::table.find(&id_owned)).execute(conn)?)
                    }
                }
            })
            .await
    }
}
