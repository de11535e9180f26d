#[cfg(test)]
mod tests {
    use crate::detail::{PokemonDetailPresenter, DETAIL_ERROR_MESSAGE};
    use crate::resource::Resource;
    use crate::tests::common::{bulbasaur_dto, pokemon_dto, FakeGateway};
    use crate::{PokemonType, StatType};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("bulbasaur")]
    #[case("BULBASAUR")]
    #[case("  Bulbasaur ")]
    #[tokio::test]
    async fn test_fetch_detail_lowercases_name(#[case] name: &str) {
        // Arrange
        let gateway = FakeGateway::new(0).with_pokemon(bulbasaur_dto()).into_arc();
        let presenter = PokemonDetailPresenter::new(gateway.clone());

        // Act
        let detail = presenter.fetch_detail(name).await;

        // Assert
        assert!(detail.is_success(), "got {:?}", detail);
        assert_eq!(gateway.detail_requests(), vec!["bulbasaur".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_detail_maps_the_payload() {
        let gateway = FakeGateway::new(0).with_pokemon(bulbasaur_dto()).into_arc();
        let presenter = PokemonDetailPresenter::new(gateway);

        let detail = presenter
            .fetch_detail("bulbasaur")
            .await
            .into_data()
            .expect("bulbasaur exists");

        assert_eq!(detail.id, 1);
        assert_eq!(detail.types, vec![PokemonType::Grass, PokemonType::Poison]);
        assert!((detail.weight_kg - 6.9).abs() < 1e-4);
        assert!((detail.height_m - 0.7).abs() < 1e-4);
        assert_eq!(detail.max_base_stat(), 65);
        assert_eq!(detail.stats[3].stat, StatType::SpecialAttack);
        assert_eq!(detail.dominant_color(), PokemonType::Grass.color());
    }

    #[tokio::test]
    async fn test_missing_pokemon_is_an_error_state() {
        let gateway = FakeGateway::new(0).into_arc();
        let presenter = PokemonDetailPresenter::new(gateway);

        let detail = presenter.fetch_detail("agumon").await;

        assert_eq!(detail, Resource::Error(DETAIL_ERROR_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_every_fetch_goes_to_the_gateway() {
        let gateway = FakeGateway::new(0)
            .with_pokemon(pokemon_dto(25, "pikachu", &["electric"], [35, 55, 40, 50, 50, 90]))
            .into_arc();
        let presenter = PokemonDetailPresenter::new(gateway.clone());

        let first = presenter.fetch_detail("pikachu").await;
        let second = presenter.fetch_detail("pikachu").await;

        assert_eq!(first, second);
        assert_eq!(gateway.detail_requests().len(), 2);
    }
}
