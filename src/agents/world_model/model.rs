//! World-model network
use super::{keys, WorldModelConfig};
use crate::builders::FeatureMap;
use crate::scene::{TrajectorySampling, EGO_STATUS_DIM};
use std::fmt;
use tch::{nn, Device, Tensor};

/// MLP world model predicting future ego poses.
///
/// Encodes the ego status and the scene embedding separately, concatenates
/// the codes, and decodes a trajectory of `num_poses` (x, y, heading) rows.
/// In latent mode a second head reconstructs the scene embedding.
///
/// Owns its [`nn::VarStore`]; optimizers and checkpoint import operate on
/// the store's trainable variables.
pub struct WorldModelNet {
    vs: nn::VarStore,
    ego_encoder: nn::Sequential,
    scene_encoder: nn::Sequential,
    trajectory_head: nn::Sequential,
    reconstruction_head: Option<nn::Sequential>,
    num_poses: i64,
}

impl fmt::Debug for WorldModelNet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // nn::Sequential has no Debug impl.
        f.debug_struct("WorldModelNet")
            .field("device", &self.vs.device())
            .field("num_poses", &self.num_poses)
            .field("latent", &self.reconstruction_head.is_some())
            .finish()
    }
}

impl WorldModelNet {
    pub fn new(
        trajectory_sampling: TrajectorySampling,
        config: &WorldModelConfig,
        device: Device,
    ) -> Self {
        let vs = nn::VarStore::new(device);
        let root = vs.root();
        let hidden = config.hidden_dim;
        let num_poses = trajectory_sampling.num_poses();

        let ego_encoder = nn::seq()
            .add(nn::linear(
                &(&root / "ego_encoder") / "linear",
                EGO_STATUS_DIM,
                hidden,
                Default::default(),
            ))
            .add_fn(|xs| xs.relu());
        let scene_encoder = nn::seq()
            .add(nn::linear(
                &(&root / "scene_encoder") / "linear",
                config.embedding_dim,
                hidden,
                Default::default(),
            ))
            .add_fn(|xs| xs.relu());
        let trajectory_head = nn::seq()
            .add(nn::linear(
                &(&root / "trajectory_head") / "hidden",
                2 * hidden,
                hidden,
                Default::default(),
            ))
            .add_fn(|xs| xs.relu())
            .add(nn::linear(
                &(&root / "trajectory_head") / "output",
                hidden,
                num_poses * 3,
                Default::default(),
            ));
        let reconstruction_head = config.latent.then(|| {
            nn::seq().add(nn::linear(
                &(&root / "reconstruction_head") / "output",
                2 * hidden,
                config.embedding_dim,
                Default::default(),
            ))
        });

        Self {
            vs,
            ego_encoder,
            scene_encoder,
            trajectory_head,
            reconstruction_head,
            num_poses,
        }
    }

    /// The output tensor names `forward` produces, in declaration order.
    #[must_use]
    pub fn output_names(&self) -> &'static [&'static str] {
        if self.reconstruction_head.is_some() {
            &[keys::TRAJECTORY, keys::SCENE_RECONSTRUCTION]
        } else {
            &[keys::TRAJECTORY]
        }
    }

    /// Run the model on a batch of input features.
    ///
    /// Expects `ego_status` `[batch, 8]` and `scene_embedding`
    /// `[batch, embedding_dim]`; missing features panic, matching the
    /// harness contract that builders and model agree on names.
    pub fn forward(&self, features: &FeatureMap) -> FeatureMap {
        let ego = features[keys::EGO_STATUS].apply(&self.ego_encoder);
        let scene = features[keys::SCENE_EMBEDDING].apply(&self.scene_encoder);
        let joint = Tensor::cat(&[ego, scene], -1);

        let trajectory = joint
            .apply(&self.trajectory_head)
            .reshape(&[-1, self.num_poses, 3]);
        let mut outputs = FeatureMap::new();
        outputs.insert(keys::TRAJECTORY.to_owned(), trajectory);
        if let Some(head) = &self.reconstruction_head {
            outputs.insert(keys::SCENE_RECONSTRUCTION.to_owned(), joint.apply(head));
        }
        outputs
    }

    /// Variable store holding all trainable parameters.
    #[must_use]
    pub const fn var_store(&self) -> &nn::VarStore {
        &self.vs
    }

    pub fn var_store_mut(&mut self) -> &mut nn::VarStore {
        &mut self.vs
    }
}

#[cfg(test)]
mod world_model_net {
    use super::*;
    use rstest::rstest;
    use tch::Kind;

    fn small_config(latent: bool) -> WorldModelConfig {
        WorldModelConfig {
            latent,
            embedding_dim: 16,
            hidden_dim: 32,
            ..WorldModelConfig::default()
        }
    }

    fn batch_features(batch_size: i64, config: &WorldModelConfig) -> FeatureMap {
        let mut features = FeatureMap::new();
        features.insert(
            keys::EGO_STATUS.to_owned(),
            Tensor::zeros(&[batch_size, EGO_STATUS_DIM], (Kind::Float, Device::Cpu)),
        );
        features.insert(
            keys::SCENE_EMBEDDING.to_owned(),
            Tensor::zeros(&[batch_size, config.embedding_dim], (Kind::Float, Device::Cpu)),
        );
        features
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn output_shapes(#[case] latent: bool) {
        let config = small_config(latent);
        let sampling = TrajectorySampling::default();
        let model = WorldModelNet::new(sampling, &config, Device::Cpu);

        let outputs = model.forward(&batch_features(4, &config));
        assert_eq!(
            outputs[keys::TRAJECTORY].size(),
            vec![4, sampling.num_poses(), 3]
        );
        if latent {
            assert_eq!(
                outputs[keys::SCENE_RECONSTRUCTION].size(),
                vec![4, config.embedding_dim]
            );
        }
    }

    #[rstest]
    #[case(false, &["trajectory"])]
    #[case(true, &["trajectory", "scene_reconstruction"])]
    fn declared_output_names(#[case] latent: bool, #[case] expected: &[&str]) {
        let model = WorldModelNet::new(
            TrajectorySampling::default(),
            &small_config(latent),
            Device::Cpu,
        );
        assert_eq!(model.output_names(), expected);
    }
}
