use std::collections::{HashMap, HashSet};

use mongodb::bson::oid::ObjectId;

use crate::models::{Workplace, WorkplaceReview};

/// Search filters from `GET /workplaces`. All optional; supplied filters
/// AND together, absent filters leave the set unconstrained.
#[derive(Debug, Default, Clone)]
pub struct WorkplaceFilter {
    pub location: Option<String>,
    pub role: Option<String>,
    pub rating: Option<f64>,
    pub facilities: Option<String>,
}

impl WorkplaceFilter {
    /// True when at least one filter needs review data to evaluate.
    pub fn needs_reviews(&self) -> bool {
        self.rating.is_some() || self.role.is_some() || self.facilities.is_some()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// City or postcode substring match.
pub fn matches_location(workplace: &Workplace, needle: &str) -> bool {
    contains_ignore_case(&workplace.city, needle)
        || contains_ignore_case(&workplace.postcode, needle)
}

/// Average review rating per workplace. Workplaces without reviews are
/// absent from the map and can never satisfy a rating threshold.
pub fn average_ratings(reviews: &[WorkplaceReview]) -> HashMap<ObjectId, f64> {
    let mut sums: HashMap<ObjectId, (i64, i64)> = HashMap::new();
    for review in reviews {
        let entry = sums.entry(review.workplace_id).or_insert((0, 0));
        entry.0 += review.rating as i64;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(id, (sum, count))| (id, sum as f64 / count as f64))
        .collect()
}

/// Ids of workplaces with at least one review satisfying every supplied
/// review-text filter: `position` equals `role` case-insensitively, and the
/// facilities text contains `facilities`. A single review must match both.
pub fn review_matched_ids(
    reviews: &[WorkplaceReview],
    role: Option<&str>,
    facilities: Option<&str>,
) -> HashSet<ObjectId> {
    let mut ids = HashSet::new();
    for review in reviews {
        let matches_role =
            role.map_or(true, |r| review.position.to_lowercase() == r.to_lowercase());
        let matches_facilities = facilities.map_or(true, |f| {
            review
                .facilities
                .as_deref()
                .map_or(false, |text| contains_ignore_case(text, f))
        });
        if matches_role && matches_facilities {
            ids.insert(review.workplace_id);
        }
    }
    ids
}

/// Linear scan over the candidate set.
pub fn apply(
    workplaces: Vec<Workplace>,
    reviews: &[WorkplaceReview],
    query: &WorkplaceFilter,
) -> Vec<Workplace> {
    let mut result = workplaces;

    if let Some(location) = query.location.as_deref() {
        result.retain(|w| matches_location(w, location));
    }

    if let Some(min_rating) = query.rating {
        let averages = average_ratings(reviews);
        result.retain(|w| {
            w.id.and_then(|id| averages.get(&id).copied())
                .map_or(false, |avg| avg >= min_rating)
        });
    }

    if query.role.is_some() || query.facilities.is_some() {
        let matched =
            review_matched_ids(reviews, query.role.as_deref(), query.facilities.as_deref());
        result.retain(|w| w.id.map_or(false, |id| matched.contains(&id)));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkplaceType;
    use mongodb::bson::DateTime;

    fn workplace(name: &str, city: &str, postcode: &str) -> Workplace {
        Workplace {
            id: Some(ObjectId::new()),
            name: name.to_string(),
            city: city.to_string(),
            postcode: postcode.to_string(),
            address: "123 Main Street".to_string(),
            workplace_type: WorkplaceType::Pharmacy,
            phone: None,
            created_by: ObjectId::new(),
            created_at: DateTime::now(),
        }
    }

    fn review(workplace_id: ObjectId, rating: i32, position: &str, facilities: Option<&str>) -> WorkplaceReview {
        WorkplaceReview {
            id: Some(ObjectId::new()),
            workplace_id,
            user_id: ObjectId::new(),
            rating,
            position: position.to_string(),
            pay_rate: 25.0,
            payment_time: 14,
            transport: "On-site parking".to_string(),
            facilities: facilities.map(str::to_string),
            comments: "Well organised dispensary".to_string(),
            created_at: DateTime::now(),
        }
    }

    #[test]
    fn no_filters_returns_everything() {
        let workplaces = vec![
            workplace("City Centre Pharmacy", "Manchester", "M1 1AA"),
            workplace("Vision Care Clinic", "Leeds", "LS1 1BB"),
        ];
        let result = apply(workplaces, &[], &WorkplaceFilter::default());
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn location_matches_city_or_postcode_substring() {
        let workplaces = vec![
            workplace("City Centre Pharmacy", "Manchester", "M1 1AA"),
            workplace("Vision Care Clinic", "Leeds", "LS1 1BB"),
            workplace("Healthcare Plus", "Birmingham", "B1 1CC"),
        ];

        let by_city = apply(
            workplaces.clone(),
            &[],
            &WorkplaceFilter { location: Some("manchester".to_string()), ..Default::default() },
        );
        assert_eq!(by_city.len(), 1);
        assert_eq!(by_city[0].city, "Manchester");

        let by_postcode = apply(
            workplaces,
            &[],
            &WorkplaceFilter { location: Some("ls1".to_string()), ..Default::default() },
        );
        assert_eq!(by_postcode.len(), 1);
        assert_eq!(by_postcode[0].city, "Leeds");
    }

    #[test]
    fn rating_filter_uses_review_average() {
        let good = workplace("Good Pharmacy", "Manchester", "M1 1AA");
        let mediocre = workplace("Mediocre Pharmacy", "Manchester", "M2 2BB");
        let unreviewed = workplace("New Pharmacy", "Manchester", "M3 3CC");
        let good_id = good.id.unwrap();
        let mediocre_id = mediocre.id.unwrap();

        // avg 4.0 passes a >= 4 threshold, avg 3.5 does not
        let reviews = vec![
            review(good_id, 3, "pharmacist", None),
            review(good_id, 5, "pharmacist", None),
            review(mediocre_id, 3, "pharmacist", None),
            review(mediocre_id, 4, "pharmacist", None),
        ];

        let result = apply(
            vec![good, mediocre, unreviewed],
            &reviews,
            &WorkplaceFilter { rating: Some(4.0), ..Default::default() },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Good Pharmacy");
    }

    #[test]
    fn zero_review_workplaces_never_satisfy_rating() {
        let unreviewed = workplace("New Pharmacy", "Manchester", "M3 3CC");
        let result = apply(
            vec![unreviewed],
            &[],
            &WorkplaceFilter { rating: Some(1.0), ..Default::default() },
        );
        assert!(result.is_empty());
    }

    #[test]
    fn role_filter_matches_position_case_insensitively() {
        let pharmacy = workplace("City Centre Pharmacy", "Manchester", "M1 1AA");
        let clinic = workplace("Vision Care Clinic", "Leeds", "LS1 1BB");
        let reviews = vec![
            review(pharmacy.id.unwrap(), 4, "Pharmacist", None),
            review(clinic.id.unwrap(), 4, "optometrist", None),
        ];

        let result = apply(
            vec![pharmacy, clinic],
            &reviews,
            &WorkplaceFilter { role: Some("pharmacist".to_string()), ..Default::default() },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "City Centre Pharmacy");
    }

    #[test]
    fn facilities_filter_matches_substring() {
        let with_parking = workplace("City Centre Pharmacy", "Manchester", "M1 1AA");
        let without = workplace("Healthcare Plus", "Birmingham", "B1 1CC");
        let reviews = vec![
            review(with_parking.id.unwrap(), 4, "pharmacist", Some("Free parking, staff room")),
            review(without.id.unwrap(), 4, "pharmacist", None),
        ];

        let result = apply(
            vec![with_parking, without],
            &reviews,
            &WorkplaceFilter { facilities: Some("parking".to_string()), ..Default::default() },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "City Centre Pharmacy");
    }

    #[test]
    fn role_and_facilities_must_match_the_same_review() {
        let w = workplace("City Centre Pharmacy", "Manchester", "M1 1AA");
        let id = w.id.unwrap();
        // one review matches the role, a different one the facilities
        let reviews = vec![
            review(id, 4, "pharmacist", None),
            review(id, 4, "dispenser", Some("Free parking")),
        ];

        let query = WorkplaceFilter {
            role: Some("pharmacist".to_string()),
            facilities: Some("parking".to_string()),
            ..Default::default()
        };
        assert!(apply(vec![w.clone()], &reviews, &query).is_empty());

        let combined = vec![review(id, 4, "pharmacist", Some("Free parking"))];
        assert_eq!(apply(vec![w], &combined, &query).len(), 1);
    }

    #[test]
    fn filters_combine_with_logical_and() {
        let manchester = workplace("City Centre Pharmacy", "Manchester", "M1 1AA");
        let leeds = workplace("Leeds Pharmacy", "Leeds", "LS1 1BB");
        let reviews = vec![
            review(manchester.id.unwrap(), 5, "pharmacist", None),
            review(leeds.id.unwrap(), 5, "pharmacist", None),
        ];

        let query = WorkplaceFilter {
            location: Some("manchester".to_string()),
            role: Some("pharmacist".to_string()),
            rating: Some(4.0),
            facilities: None,
        };
        let result = apply(vec![manchester, leeds], &reviews, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city, "Manchester");
    }
}
