//! Data-access façade: typed operations over the MongoDB collections.
//! Routes translate the driver errors returned here into opaque 500s.

pub mod filter;

use std::collections::{HashMap, HashSet};

use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::FindOptions;
use rocket::futures::TryStreamExt;

use crate::db::DbConn;
use crate::models::{
    Agency, AgencyReview, AgencyReviewWithAuthor, Contact, CreateAgencyDto,
    CreateAgencyReviewDto, CreateContactDto, CreateFaqQuestionDto, CreateWorkplaceDto,
    CreateWorkplaceReviewDto, FaqQuestion, RegisterDto, ReviewAuthor, User, Workplace,
    WorkplaceReview, WorkplaceReviewWithAuthor,
};
use filter::WorkplaceFilter;

type StorageResult<T> = Result<T, mongodb::error::Error>;

/* ----------------------------- Users ----------------------------- */

pub async fn get_user(db: &DbConn, id: ObjectId) -> StorageResult<Option<User>> {
    db.collection::<User>("users")
        .find_one(doc! { "_id": id }, None)
        .await
}

pub async fn get_user_by_username(db: &DbConn, username: &str) -> StorageResult<Option<User>> {
    db.collection::<User>("users")
        .find_one(doc! { "username": username }, None)
        .await
}

pub async fn get_user_by_email(db: &DbConn, email: &str) -> StorageResult<Option<User>> {
    db.collection::<User>("users")
        .find_one(doc! { "email": email }, None)
        .await
}

pub async fn create_user(
    db: &DbConn,
    dto: RegisterDto,
    password_hash: String,
) -> StorageResult<User> {
    let mut user = User {
        id: None,
        username: dto.username,
        password: password_hash,
        full_name: dto.full_name,
        email: dto.email,
        profession: dto.profession,
        created_at: DateTime::now(),
    };
    let result = db.collection::<User>("users").insert_one(&user, None).await?;
    user.id = result.inserted_id.as_object_id();
    Ok(user)
}

/* ----------------------------- Workplaces ----------------------------- */

/// Filtering runs as a linear scan in `filter::apply`; review data is only
/// fetched when a supplied filter depends on it.
pub async fn get_workplaces(db: &DbConn, query: &WorkplaceFilter) -> StorageResult<Vec<Workplace>> {
    let workplaces: Vec<Workplace> = db
        .collection::<Workplace>("workplaces")
        .find(None, None)
        .await?
        .try_collect()
        .await?;

    let reviews: Vec<WorkplaceReview> = if query.needs_reviews() {
        db.collection::<WorkplaceReview>("workplace_reviews")
            .find(None, None)
            .await?
            .try_collect()
            .await?
    } else {
        Vec::new()
    };

    Ok(filter::apply(workplaces, &reviews, query))
}

pub async fn get_workplace(db: &DbConn, id: ObjectId) -> StorageResult<Option<Workplace>> {
    db.collection::<Workplace>("workplaces")
        .find_one(doc! { "_id": id }, None)
        .await
}

pub async fn create_workplace(
    db: &DbConn,
    dto: CreateWorkplaceDto,
    created_by: ObjectId,
) -> StorageResult<Workplace> {
    let mut workplace = Workplace {
        id: None,
        name: dto.name,
        city: dto.city,
        postcode: dto.postcode,
        address: dto.address,
        workplace_type: dto.workplace_type,
        phone: dto.phone,
        created_by,
        created_at: DateTime::now(),
    };
    let result = db
        .collection::<Workplace>("workplaces")
        .insert_one(&workplace, None)
        .await?;
    workplace.id = result.inserted_id.as_object_id();
    Ok(workplace)
}

/* ----------------------------- Agencies ----------------------------- */

pub async fn get_agencies(db: &DbConn) -> StorageResult<Vec<Agency>> {
    db.collection::<Agency>("agencies")
        .find(None, None)
        .await?
        .try_collect()
        .await
}

pub async fn get_agency(db: &DbConn, id: ObjectId) -> StorageResult<Option<Agency>> {
    db.collection::<Agency>("agencies")
        .find_one(doc! { "_id": id }, None)
        .await
}

pub async fn create_agency(
    db: &DbConn,
    dto: CreateAgencyDto,
    created_by: ObjectId,
) -> StorageResult<Agency> {
    let mut agency = Agency {
        id: None,
        name: dto.name,
        location: dto.location,
        created_by,
        created_at: DateTime::now(),
    };
    let result = db
        .collection::<Agency>("agencies")
        .insert_one(&agency, None)
        .await?;
    agency.id = result.inserted_id.as_object_id();
    Ok(agency)
}

/* ----------------------------- Reviews ----------------------------- */

pub async fn get_workplace_reviews(
    db: &DbConn,
    workplace_id: ObjectId,
) -> StorageResult<Vec<WorkplaceReviewWithAuthor>> {
    let find_options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();

    let reviews: Vec<WorkplaceReview> = db
        .collection::<WorkplaceReview>("workplace_reviews")
        .find(doc! { "workplace_id": workplace_id }, find_options)
        .await?
        .try_collect()
        .await?;

    let authors = load_authors(db, reviews.iter().map(|r| r.user_id)).await?;
    Ok(reviews
        .into_iter()
        .map(|review| {
            let user = authors.get(&review.user_id).map(ReviewAuthor::from);
            WorkplaceReviewWithAuthor { review, user }
        })
        .collect())
}

pub async fn create_workplace_review(
    db: &DbConn,
    workplace_id: ObjectId,
    user_id: ObjectId,
    dto: CreateWorkplaceReviewDto,
) -> StorageResult<WorkplaceReview> {
    let mut review = WorkplaceReview {
        id: None,
        workplace_id,
        user_id,
        rating: dto.rating,
        position: dto.position,
        pay_rate: dto.pay_rate,
        payment_time: dto.payment_time,
        transport: dto.transport,
        facilities: dto.facilities,
        comments: dto.comments,
        created_at: DateTime::now(),
    };
    let result = db
        .collection::<WorkplaceReview>("workplace_reviews")
        .insert_one(&review, None)
        .await?;
    review.id = result.inserted_id.as_object_id();
    Ok(review)
}

pub async fn get_agency_reviews(
    db: &DbConn,
    agency_id: ObjectId,
) -> StorageResult<Vec<AgencyReviewWithAuthor>> {
    let find_options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();

    let reviews: Vec<AgencyReview> = db
        .collection::<AgencyReview>("agency_reviews")
        .find(doc! { "agency_id": agency_id }, find_options)
        .await?
        .try_collect()
        .await?;

    let authors = load_authors(db, reviews.iter().map(|r| r.user_id)).await?;
    Ok(reviews
        .into_iter()
        .map(|review| {
            let user = authors.get(&review.user_id).map(ReviewAuthor::from);
            AgencyReviewWithAuthor { review, user }
        })
        .collect())
}

pub async fn create_agency_review(
    db: &DbConn,
    agency_id: ObjectId,
    user_id: ObjectId,
    dto: CreateAgencyReviewDto,
) -> StorageResult<AgencyReview> {
    let mut review = AgencyReview {
        id: None,
        agency_id,
        user_id,
        rating: dto.rating,
        pay_rates: dto.pay_rates,
        payment_reliability: dto.payment_reliability,
        communication: dto.communication,
        comments: dto.comments,
        created_at: DateTime::now(),
    };
    let result = db
        .collection::<AgencyReview>("agency_reviews")
        .insert_one(&review, None)
        .await?;
    review.id = result.inserted_id.as_object_id();
    Ok(review)
}

/// One batched lookup for all review authors. Reviews whose author is gone
/// keep a `None` author rather than a placeholder record.
async fn load_authors(
    db: &DbConn,
    user_ids: impl Iterator<Item = ObjectId>,
) -> StorageResult<HashMap<ObjectId, User>> {
    let ids: Vec<ObjectId> = user_ids.collect::<HashSet<_>>().into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users: Vec<User> = db
        .collection::<User>("users")
        .find(doc! { "_id": { "$in": ids } }, None)
        .await?
        .try_collect()
        .await?;

    Ok(users
        .into_iter()
        .filter_map(|user| user.id.map(|id| (id, user)))
        .collect())
}

/* ----------------------------- Submissions ----------------------------- */

pub async fn create_contact(db: &DbConn, dto: CreateContactDto) -> StorageResult<Contact> {
    let mut contact = Contact {
        id: None,
        name: dto.name,
        email: dto.email,
        subject: dto.subject,
        message: dto.message,
        created_at: DateTime::now(),
    };
    let result = db
        .collection::<Contact>("contacts")
        .insert_one(&contact, None)
        .await?;
    contact.id = result.inserted_id.as_object_id();
    Ok(contact)
}

pub async fn create_faq_question(
    db: &DbConn,
    dto: CreateFaqQuestionDto,
) -> StorageResult<FaqQuestion> {
    let mut question = FaqQuestion {
        id: None,
        name: dto.name,
        email: dto.email,
        question: dto.question,
        anonymous: dto.anonymous,
        created_at: DateTime::now(),
    };
    let result = db
        .collection::<FaqQuestion>("faq_questions")
        .insert_one(&question, None)
        .await?;
    question.id = result.inserted_id.as_object_id();
    Ok(question)
}
