#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Clock;
use auth::PasswordHasher;
use auth::SystemClock;
use auth::TokenService;
use catalog_service::account::errors::AccountError;
use catalog_service::account::models::Account;
use catalog_service::account::ports::AccountRepository;
use catalog_service::book::errors::BookError;
use catalog_service::book::models::Book;
use catalog_service::book::models::BookFilter;
use catalog_service::book::models::BookLookup;
use catalog_service::book::models::BookPatch;
use catalog_service::book::ports::BookRepository;
use catalog_service::domain::account::service::AccountService;
use catalog_service::domain::book::service::BookService;
use catalog_service::inbound::http::router::create_router;
use serde_json::json;
use tokio::sync::Mutex;

pub const TEST_SECRET: &[u8] = b"integration-test-signing-key-0123456789";
pub const TEST_TTL_SECONDS: i64 = 1800;

/// Authenticator with cheap Argon2 parameters.
pub fn test_authenticator(clock: Arc<dyn Clock>) -> Authenticator {
    let token_service = TokenService::new(
        TEST_SECRET,
        "HMAC-SHA256",
        chrono::Duration::seconds(TEST_TTL_SECONDS),
    )
    .expect("Failed to build token service")
    .with_clock(clock);
    let password_hasher =
        PasswordHasher::with_params(1024, 1, 1).expect("Failed to build password hasher");

    Authenticator::new(password_hasher, token_service)
}

/// Account store backed by a vector; uniqueness is checked under the lock.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub async fn count(&self) -> usize {
        self.accounts.lock().await.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().await;
        let mut matches = accounts.iter().filter(|a| a.email.as_str() == email);
        let found = matches.next().cloned();
        if matches.next().is_some() {
            return Err(AccountError::IntegrityViolation(email.to_string()));
        }
        Ok(found)
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::AlreadyExists(account.email.to_string()));
        }
        accounts.push(account.clone());
        Ok(account)
    }
}

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub async fn count(&self) -> usize {
        self.books.lock().await.len()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_one(&self, lookup: &BookLookup) -> Result<Option<Book>, BookError> {
        let books = self.books.lock().await;
        Ok(books.iter().find(|b| lookup.matches(b)).cloned())
    }

    async fn find_many(&self, filter: &BookFilter) -> Result<Vec<Book>, BookError> {
        let books = self.books.lock().await;
        Ok(books.iter().filter(|b| filter.matches(b)).cloned().collect())
    }

    async fn create(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self.books.lock().await;
        if books.iter().any(|b| b.isbn == book.isbn) {
            return Err(BookError::AlreadyExists(book.isbn));
        }
        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, isbn: &str, patch: BookPatch) -> Result<Book, BookError> {
        let mut books = self.books.lock().await;
        if let Some(new_isbn) = &patch.isbn {
            if new_isbn != isbn && books.iter().any(|b| b.isbn == *new_isbn) {
                return Err(BookError::AlreadyExists(new_isbn.clone()));
            }
        }
        let book = books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or_else(|| BookError::NotFoundByIsbn(isbn.to_string()))?;
        book.apply(patch);
        Ok(book.clone())
    }

    async fn delete(&self, isbn: &str) -> Result<(), BookError> {
        let mut books = self.books.lock().await;
        let before = books.len();
        books.retain(|b| b.isbn != isbn);
        if books.len() == before {
            return Err(BookError::NotFoundByIsbn(isbn.to_string()));
        }
        Ok(())
    }
}

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub books: Arc<InMemoryBookRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_clock(Arc::new(SystemClock)).await
    }

    /// Spawn with a controllable token clock.
    pub async fn spawn_with_clock(clock: Arc<dyn Clock>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let accounts = Arc::new(InMemoryAccountRepository::default());
        let books = Arc::new(InMemoryBookRepository::default());
        let authenticator = Arc::new(test_authenticator(clock));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&accounts),
            Arc::clone(&authenticator),
        ));
        let book_service = Arc::new(BookService::new(Arc::clone(&books)));

        let router = create_router(account_service, book_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            accounts,
            books,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Sign up a fresh account and return its access token.
    pub async fn signup_token(&self, email: &str) -> String {
        let response = self
            .post("/auth/signup")
            .json(&json!({ "email": email, "password": "pass_word!" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Create a book through the API and assert it was stored.
    pub async fn create_book(&self, token: &str, book: serde_json::Value) {
        let response = self
            .post_authenticated("/api/books/", token)
            .json(&book)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }
}
