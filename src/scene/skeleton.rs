use glam::{Affine3A, Quat, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::scene::BoneHandle;
use crate::scene::transform::Transform;

/// A named joint of a skeleton.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    pub transform: Transform,

    pub(crate) parent: Option<BoneHandle>,
    pub(crate) children: Vec<BoneHandle>,

    // Bind pose captured when the bone was added
    rest_position: Vec3,
    rest_rotation: Quat,
    rest_scale: Vec3,

    world_matrix: Affine3A,
}

impl Bone {
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<BoneHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[BoneHandle] {
        &self.children
    }

    /// Skeleton-space matrix as of the last
    /// [`Skeleton::update_world_matrices`].
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    #[must_use]
    pub fn rest_pose(&self) -> (Vec3, Quat, Vec3) {
        (self.rest_position, self.rest_rotation, self.rest_scale)
    }
}

/// Bone hierarchy of a skinned model.
///
/// Bones are looked up by name; when two bones share a name the one added
/// first wins.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    pub name: String,

    bones: SlotMap<BoneHandle, Bone>,
    // Insertion order; parents always precede their children
    order: Vec<BoneHandle>,
    by_name: FxHashMap<String, BoneHandle>,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Adds a bone whose current transform also becomes its rest pose.
    ///
    /// Returns `None` if `parent` is not a bone of this skeleton.
    pub fn add_bone(
        &mut self,
        name: &str,
        parent: Option<BoneHandle>,
        transform: Transform,
    ) -> Option<BoneHandle> {
        if let Some(p) = parent
            && !self.bones.contains_key(p)
        {
            return None;
        }

        let handle = self.bones.insert(Bone {
            name: name.to_string(),
            rest_position: transform.position,
            rest_rotation: transform.rotation,
            rest_scale: transform.scale,
            transform,
            parent,
            children: Vec::new(),
            world_matrix: Affine3A::IDENTITY,
        });

        if let Some(p) = parent {
            self.bones[p].children.push(handle);
        }
        self.order.push(handle);
        self.by_name.entry(name.to_string()).or_insert(handle);

        Some(handle)
    }

    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<BoneHandle> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn bone(&self, handle: BoneHandle) -> Option<&Bone> {
        self.bones.get(handle)
    }

    pub fn bone_mut(&mut self, handle: BoneHandle) -> Option<&mut Bone> {
        self.bones.get_mut(handle)
    }

    #[must_use]
    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.find_bone(name).and_then(|h| self.bones.get(h))
    }

    /// Bones in insertion order.
    pub fn bones(&self) -> impl Iterator<Item = (BoneHandle, &Bone)> {
        self.order.iter().map(move |&h| (h, &self.bones[h]))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Restores every bone to the pose it had when it was added.
    pub fn reset_pose(&mut self) {
        for bone in self.bones.values_mut() {
            bone.transform.position = bone.rest_position;
            bone.transform.rotation = bone.rest_rotation;
            bone.transform.scale = bone.rest_scale;
            bone.transform.mark_dirty();
        }
    }

    /// Recomputes local and skeleton-space matrices of all bones.
    pub fn update_world_matrices(&mut self) {
        for i in 0..self.order.len() {
            let handle = self.order[i];
            let parent_world = self.bones[handle]
                .parent
                .map_or(Affine3A::IDENTITY, |p| self.bones[p].world_matrix);

            let bone = &mut self.bones[handle];
            bone.transform.update_local_matrix();
            bone.world_matrix = parent_world * *bone.transform.local_matrix();
        }
    }

    /// Skeleton-space position of a bone as of the last matrix update.
    #[must_use]
    pub fn world_position(&self, handle: BoneHandle) -> Option<Vec3> {
        self.bones
            .get(handle)
            .map(|b| Vec3::from(b.world_matrix.translation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (Skeleton, BoneHandle, BoneHandle) {
        let mut skeleton = Skeleton::new("rig");
        let hip = skeleton
            .add_bone("Hip", None, Transform::from_trs(Vec3::Y, Quat::IDENTITY, Vec3::ONE))
            .unwrap();
        let spine = skeleton
            .add_bone(
                "Spine",
                Some(hip),
                Transform::from_trs(Vec3::new(0.0, 0.5, 0.0), Quat::IDENTITY, Vec3::ONE),
            )
            .unwrap();
        (skeleton, hip, spine)
    }

    #[test]
    fn lookup_by_name_and_hierarchy() {
        let (skeleton, hip, spine) = chain();
        assert_eq!(skeleton.find_bone("Hip"), Some(hip));
        assert_eq!(skeleton.find_bone("Spine"), Some(spine));
        assert_eq!(skeleton.find_bone("spine"), None);
        assert_eq!(skeleton.bone(spine).unwrap().parent(), Some(hip));
        assert_eq!(skeleton.bone(hip).unwrap().children(), &[spine]);
        assert_eq!(skeleton.len(), 2);
    }

    #[test]
    fn duplicate_names_resolve_to_first_bone() {
        let (mut skeleton, hip, _) = chain();
        let dup = skeleton.add_bone("Hip", None, Transform::new()).unwrap();
        assert_ne!(dup, hip);
        assert_eq!(skeleton.find_bone("Hip"), Some(hip));
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let (skeleton, hip, _) = chain();
        let mut empty = Skeleton::new("empty");
        assert!(empty.add_bone("X", Some(hip), Transform::new()).is_none());
        assert!(empty.is_empty());
        assert_eq!(skeleton.len(), 2);
    }

    #[test]
    fn world_matrices_follow_parent() {
        let (mut skeleton, hip, spine) = chain();
        skeleton.bone_mut(hip).unwrap().transform.position = Vec3::new(1.0, 1.0, 0.0);
        skeleton.update_world_matrices();
        let p = skeleton.world_position(spine).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(1.0, 1.5, 0.0), 1e-6), "{p:?}");
    }

    #[test]
    fn reset_pose_restores_rest_transform() {
        let (mut skeleton, _, spine) = chain();
        {
            let bone = skeleton.bone_mut(spine).unwrap();
            bone.transform.position = Vec3::splat(9.0);
            bone.transform.set_rotation_euler(0.3, 0.0, 0.0);
        }
        skeleton.reset_pose();
        let bone = skeleton.bone(spine).unwrap();
        assert_eq!(bone.transform.position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(bone.transform.rotation, Quat::IDENTITY);
    }
}
