//! Fixture data for demos and load tests.

use bytes::Bytes;
use pinboard_core::{
  Result,
  asset::{AgeGroup, AssetPayload, Audience, Chart, Gender, Insight, NewAsset},
  store::Store,
  user::{NewUser, UserId},
};

/// Insert one user and `assets` assets (split evenly across chart, insight
/// and audience), all favourited by that user. Returns the user's id.
pub fn seed<S: Store + ?Sized>(store: &S, assets: usize) -> Result<UserId> {
  let user = store.create_user(NewUser::new("user@gmail.com", "user"))?;

  for i in 0..assets / 3 {
    let chart = store.create_asset(NewAsset::new(
      format!("awesome chart {i}"),
      AssetPayload::Chart(Chart {
        title:        "chart".into(),
        title_axis_x: "x".into(),
        title_axis_y: "y".into(),
        data:         Bytes::from_static(b"some data"),
      }),
    ))?;
    let insight = store.create_asset(NewAsset::new(
      format!("awesome insight {i}"),
      AssetPayload::Insight(Insight {
        text: "40% of millenials spend more than 3hours on social media daily"
          .into(),
      }),
    ))?;
    let audience = store.create_asset(NewAsset::new(
      format!("awesome audience {i}"),
      AssetPayload::Audience(Audience {
        gender:                   Gender::Male,
        birth_country:            "Greece".into(),
        social_media_hours_usage: 2,
        age_group:                AgeGroup { min: 20, max: 30 },
      }),
    ))?;

    for asset in [chart, insight, audience] {
      store.add_favourite(user, asset)?;
    }
  }

  tracing::info!(user, assets = assets / 3 * 3, "store seeded");
  Ok(user)
}
